//! Predefined content-type schemas for the management API.
//!
//! Templates are static data; serializing one yields the body of a
//! content-type create request (`name`, `displayField`, `description`,
//! `fields`).

use serde::Serialize;
use serde_json::{json, Map, Value};

/// A content-type definition ready to be created and published.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentTypeTemplate {
    #[serde(skip)]
    pub id: &'static str,
    pub name: &'static str,
    pub display_field: &'static str,
    pub description: &'static str,
    pub fields: &'static [FieldDefinition],
}

impl ContentTypeTemplate {
    pub fn field_ids(&self) -> Vec<&'static str> {
        self.fields.iter().map(|field| field.id).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    pub id: &'static str,
    pub name: &'static str,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub localized: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_type: Option<LinkType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<ArrayItems>,
    #[serde(skip_serializing_if = "<[Validation]>::is_empty")]
    pub validations: &'static [Validation],
}

impl FieldDefinition {
    const fn new(id: &'static str, name: &'static str, field_type: FieldType) -> Self {
        Self {
            id,
            name,
            field_type,
            required: false,
            localized: None,
            link_type: None,
            items: None,
            validations: &[],
        }
    }

    const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    const fn localized(mut self, localized: bool) -> Self {
        self.localized = Some(localized);
        self
    }

    const fn link(mut self, link_type: LinkType) -> Self {
        self.link_type = Some(link_type);
        self
    }

    const fn items(mut self, items: ArrayItems) -> Self {
        self.items = Some(items);
        self
    }

    const fn validations(mut self, validations: &'static [Validation]) -> Self {
        self.validations = validations;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FieldType {
    Symbol,
    Text,
    RichText,
    Integer,
    Number,
    Date,
    Boolean,
    Object,
    Link,
    Array,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LinkType {
    Asset,
    Entry,
}

/// Element type of an `Array` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrayItems {
    #[serde(rename = "type")]
    pub item_type: FieldType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_type: Option<LinkType>,
}

impl ArrayItems {
    const fn of(item_type: FieldType) -> Self {
        Self {
            item_type,
            link_type: None,
        }
    }

    const fn links(link_type: LinkType) -> Self {
        Self {
            item_type: FieldType::Link,
            link_type: Some(link_type),
        }
    }
}

/// Field validation rules, serialized as `{"size": {..}}`, `{"unique": true}`
/// and so on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Validation {
    Size {
        #[serde(skip_serializing_if = "Option::is_none")]
        min: Option<u32>,
        #[serde(skip_serializing_if = "Option::is_none")]
        max: Option<u32>,
    },
    Range {
        #[serde(skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
    },
    Unique(bool),
    Regexp { pattern: &'static str },
}

pub const BLOG_POST: ContentTypeTemplate = ContentTypeTemplate {
    id: "blogPost",
    name: "Blog Post",
    display_field: "title",
    description: "A blog post with title, author, body, and metadata",
    fields: &[
        FieldDefinition::new("title", "Title", FieldType::Symbol)
            .required()
            .localized(false)
            .validations(&[Validation::Size {
                min: Some(1),
                max: Some(200),
            }]),
        FieldDefinition::new("slug", "Slug", FieldType::Symbol)
            .required()
            .localized(false)
            .validations(&[
                Validation::Unique(true),
                Validation::Regexp {
                    pattern: "^[a-z0-9-]+$",
                },
            ]),
        FieldDefinition::new("author", "Author", FieldType::Symbol),
        FieldDefinition::new("publishDate", "Publish Date", FieldType::Date),
        FieldDefinition::new("featuredImage", "Featured Image", FieldType::Link).link(LinkType::Asset),
        FieldDefinition::new("excerpt", "Excerpt", FieldType::Text).validations(&[Validation::Size {
            min: None,
            max: Some(300),
        }]),
        FieldDefinition::new("body", "Body", FieldType::RichText).required(),
        FieldDefinition::new("tags", "Tags", FieldType::Array).items(ArrayItems::of(FieldType::Symbol)),
        FieldDefinition::new("published", "Published", FieldType::Boolean),
    ],
};

pub const PRODUCT: ContentTypeTemplate = ContentTypeTemplate {
    id: "product",
    name: "Product",
    display_field: "name",
    description: "An e-commerce product",
    fields: &[
        FieldDefinition::new("name", "Product Name", FieldType::Symbol).required(),
        FieldDefinition::new("sku", "SKU", FieldType::Symbol)
            .required()
            .validations(&[Validation::Unique(true)]),
        FieldDefinition::new("description", "Description", FieldType::Text).required(),
        FieldDefinition::new("price", "Price", FieldType::Number)
            .required()
            .validations(&[Validation::Range {
                min: Some(0.0),
                max: None,
            }]),
        FieldDefinition::new("images", "Images", FieldType::Array).items(ArrayItems::links(LinkType::Asset)),
        FieldDefinition::new("inStock", "In Stock", FieldType::Boolean),
        FieldDefinition::new("categories", "Categories", FieldType::Array)
            .items(ArrayItems::of(FieldType::Symbol)),
    ],
};

pub const AUTHOR: ContentTypeTemplate = ContentTypeTemplate {
    id: "author",
    name: "Author",
    display_field: "name",
    description: "Content author profile",
    fields: &[
        FieldDefinition::new("name", "Full Name", FieldType::Symbol).required(),
        FieldDefinition::new("slug", "Slug", FieldType::Symbol)
            .required()
            .validations(&[Validation::Unique(true)]),
        FieldDefinition::new("email", "Email", FieldType::Symbol).validations(&[Validation::Regexp {
            pattern: r"^\w[\w.-]*@([\w-]+\.)+[\w-]+$",
        }]),
        FieldDefinition::new("bio", "Biography", FieldType::Text),
        FieldDefinition::new("avatar", "Avatar", FieldType::Link).link(LinkType::Asset),
        FieldDefinition::new("socialLinks", "Social Links", FieldType::Object),
    ],
};

pub static ALL_TEMPLATES: [ContentTypeTemplate; 3] = [BLOG_POST, PRODUCT, AUTHOR];

/// Look up a template by its content type id.
pub fn find_template(id: &str) -> Option<&'static ContentTypeTemplate> {
    ALL_TEMPLATES.iter().find(|template| template.id == id)
}

/// Localized field payload for a sample `blogPost` entry.
pub fn sample_blog_post_fields(locale: &str, publish_date: &str) -> Map<String, Value> {
    let localized = |value: Value| {
        let mut by_locale = Map::new();
        by_locale.insert(locale.to_string(), value);
        Value::Object(by_locale)
    };
    let mut fields = Map::new();
    fields.insert("title".into(), localized(json!("My First Blog Post")));
    fields.insert("slug".into(), localized(json!("my-first-blog-post")));
    fields.insert("author".into(), localized(json!("John Doe")));
    fields.insert("publishDate".into(), localized(json!(publish_date)));
    fields.insert("excerpt".into(), localized(json!("This is an exciting first post!")));
    fields.insert(
        "body".into(),
        localized(json!({
            "nodeType": "document",
            "data": {},
            "content": [{
                "nodeType": "paragraph",
                "data": {},
                "content": [{
                    "nodeType": "text",
                    "value": "Welcome to my blog! This is the first post.",
                    "marks": [],
                    "data": {}
                }]
            }]
        })),
    );
    fields.insert("tags".into(), localized(json!(["welcome", "first-post"])));
    fields.insert("published".into(), localized(json!(true)));
    fields
}
