#![allow(dead_code)]

use chrono::{DateTime, Utc};
use structmap::Reflect;

#[derive(Debug, Clone, Default, PartialEq, Reflect)]
pub struct Permissions(pub Vec<u64>);

#[derive(Debug, Clone, Default, PartialEq, Reflect)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub simple_permissions: Vec<u64>,
    pub permissions: Permissions,
}

#[derive(Debug, Clone, Default, PartialEq, Reflect)]
pub struct UserEntity {
    pub id: Option<i64>,
    pub first_name: Option<String>,
    pub permissions: Permissions,
    pub simple_permissions: Vec<u64>,
}

/// API model: everything optional.
#[derive(Debug, Clone, Default, PartialEq, Reflect)]
pub struct Template {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub categories: Option<Vec<String>>,
    pub is_starred: Option<bool>,
    pub created_at: DateTime<Utc>,
    pub owner_type: Option<String>,
    pub user: Option<User>,
}

/// Write model: plain fields.
#[derive(Debug, Clone, Default, PartialEq, Reflect)]
pub struct NewTemplate {
    pub id: i64,
    pub external_id: String,
    pub name: String,
    pub categories: Vec<String>,
    pub is_starred: bool,
    pub created_at: DateTime<Utc>,
    pub owner_type: i64,
    pub user: UserEntity,
}

/// Persistence model: optional fields, numeric owner type.
#[derive(Debug, Clone, Default, PartialEq, Reflect)]
pub struct TemplateEntity {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub categories: Option<Vec<String>>,
    pub is_starred: Option<bool>,
    pub created_at: DateTime<Utc>,
    pub owner_type: Option<i64>,
    pub user: Option<UserEntity>,
}

#[derive(Debug, Clone, Default, PartialEq, Reflect)]
pub struct MyInt(pub i64);

#[derive(Debug, Clone, Default, PartialEq, Reflect)]
pub struct MyIntEntity(pub i64);

#[derive(Debug, Clone, Default, PartialEq, Reflect)]
pub struct Uuid(pub String);

#[derive(Debug, Clone, Default, PartialEq, Reflect)]
pub struct Pages(pub i64);

#[derive(Debug, Clone, Default, PartialEq, Reflect)]
pub struct Book {
    pub id: Uuid,
    pub pages: Pages,
    pub user_id: Option<Uuid>,
}

#[derive(Debug, Clone, Default, PartialEq, Reflect)]
pub struct BookEntity {
    pub id: String,
    pub pages: i64,
    pub user_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Reflect)]
pub struct Filters(pub Vec<String>);

#[derive(Debug, Clone, Default, PartialEq, Reflect)]
pub struct Query {
    pub filters: Filters,
}

#[derive(Debug, Clone, Default, PartialEq, Reflect)]
pub struct QueryEntity {
    pub filters: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Reflect)]
pub struct MyTemplates {
    pub templates: Vec<Template>,
}

#[derive(Debug, Clone, Default, PartialEq, Reflect)]
pub struct MyNewTemplates {
    pub templates: Vec<NewTemplate>,
}

pub fn created_at() -> DateTime<Utc> {
    DateTime::from_timestamp(11111, 0).expect("valid timestamp")
}

pub fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
