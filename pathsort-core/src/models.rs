use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::reflect_record;

/// A product catalog as stored on disk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    pub title: Option<String>,
    pub products: Vec<Product>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub released: Option<NaiveDate>,
    #[serde(default)]
    pub sub_category: Option<SubCategory>,
    #[serde(default)]
    pub list_sub_category: Vec<SubCategory>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    /// Free-form attributes; sorting by them decides the key kind per value
    #[serde(default)]
    pub attributes: serde_json::Value,
}

impl Product {
    /// Name of the direct sub-category, if any
    pub fn category_name(&self) -> Option<&String> {
        self.sub_category.as_ref().map(|c| &c.name)
    }

    pub fn tag_count(&self) -> usize {
        self.tags.len()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubCategory {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub deep_category: Option<DeepCategory>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeepCategory {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    pub label: String,
    #[serde(default)]
    pub weight: u32,
}

reflect_record!(Product {
    id: i64,
    name: String,
    price: f64,
    released: Option<NaiveDate>,
    sub_category: Option<SubCategory>,
    list_sub_category: Vec<SubCategory>,
    tags: Vec<Tag>,
    attributes: serde_json::Value,
} properties {
    category_name: Option<String>,
    tag_count: usize,
});

reflect_record!(SubCategory {
    id: i64,
    name: String,
    deep_category: Option<DeepCategory>,
});

reflect_record!(DeepCategory {
    id: i64,
    name: String,
});

reflect_record!(Tag {
    label: String,
    weight: u32,
});
