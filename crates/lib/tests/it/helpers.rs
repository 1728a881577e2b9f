//! Fixture types shared by the integration tests.

use std::collections::HashMap;
use std::sync::OnceLock;

use chrono::NaiveDate;
use fieldmap::{Bean, BeanType, Mapper, Value};

/// A fresh mapper with its own caches
pub fn new_mapper() -> Mapper {
    Mapper::new()
}

/// Build a string-keyed source from `(key, value)` pairs
pub fn record<const N: usize>(pairs: [(&str, Value); N]) -> HashMap<String, Value> {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

/// camelCase user with a text name and an int age
#[derive(Debug, Clone, Default, PartialEq)]
pub struct User {
    pub user_name: String,
    pub age: i32,
}

impl Bean for User {
    fn bean_type() -> &'static BeanType {
        static TYPE: OnceLock<BeanType> = OnceLock::new();
        TYPE.get_or_init(|| {
            BeanType::builder::<User>("User")
                .property(
                    "userName",
                    |u: &User| u.user_name.clone(),
                    |u: &mut User, v| u.user_name = v,
                )
                .property("age", |u: &User| u.age, |u: &mut User, v| u.age = v)
                .default_constructor()
                .build()
        })
    }
}

/// The same user with underscore property names
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserRow {
    pub user_name: String,
    pub age: i64,
}

impl Bean for UserRow {
    fn bean_type() -> &'static BeanType {
        static TYPE: OnceLock<BeanType> = OnceLock::new();
        TYPE.get_or_init(|| {
            BeanType::builder::<UserRow>("UserRow")
                .property(
                    "user_name",
                    |u: &UserRow| u.user_name.clone(),
                    |u: &mut UserRow, v| u.user_name = v,
                )
                .property("age", |u: &UserRow| u.age, |u: &mut UserRow, v| u.age = v)
                .default_constructor()
                .build()
        })
    }
}

/// Source with a float score and an optional nickname
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Player {
    pub name: Option<String>,
    pub score: f64,
    pub level: i64,
}

impl Bean for Player {
    fn bean_type() -> &'static BeanType {
        static TYPE: OnceLock<BeanType> = OnceLock::new();
        TYPE.get_or_init(|| {
            BeanType::builder::<Player>("Player")
                .property("name", |p: &Player| p.name.clone(), |p: &mut Player, v| p.name = v)
                .property("score", |p: &Player| p.score, |p: &mut Player, v| p.score = v)
                .property("level", |p: &Player| p.level, |p: &mut Player, v| p.level = v)
                .default_constructor()
                .build()
        })
    }
}

/// Destination whose defaults are not the zero values
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub name: String,
    pub score: String,
    pub level: f64,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: "x".to_string(),
            score: String::new(),
            level: 1.0,
        }
    }
}

impl Bean for Profile {
    fn bean_type() -> &'static BeanType {
        static TYPE: OnceLock<BeanType> = OnceLock::new();
        TYPE.get_or_init(|| {
            BeanType::builder::<Profile>("Profile")
                .property("name", |p: &Profile| p.name.clone(), |p: &mut Profile, v| p.name = v)
                .property("score", |p: &Profile| p.score.clone(), |p: &mut Profile, v| p.score = v)
                .property("level", |p: &Profile| p.level, |p: &mut Profile, v| p.level = v)
                .default_constructor()
                .build()
        })
    }
}

/// Fluent-setter style type: `email` has no write accessor in its property
/// metadata, only a `setEmail` method.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Account {
    pub email: String,
    pub active: bool,
}

impl Account {
    pub fn set_email(&mut self, email: String) -> &mut Self {
        self.email = email;
        self
    }
}

impl Bean for Account {
    fn bean_type() -> &'static BeanType {
        static TYPE: OnceLock<BeanType> = OnceLock::new();
        TYPE.get_or_init(|| {
            BeanType::builder::<Account>("Account")
                .read_only("email", |a: &Account| a.email.clone())
                .method("setEmail", |a: &mut Account, v: String| {
                    a.set_email(v);
                })
                .property("active", |a: &Account| a.active, |a: &mut Account, v| a.active = v)
                .default_constructor()
                .build()
        })
    }
}

/// Base type embedded in [`Customer`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Entity {
    pub id: i64,
    pub note: Option<String>,
}

impl Bean for Entity {
    fn bean_type() -> &'static BeanType {
        static TYPE: OnceLock<BeanType> = OnceLock::new();
        TYPE.get_or_init(|| {
            BeanType::builder::<Entity>("Entity")
                .property("id", |e: &Entity| e.id, |e: &mut Entity, v| e.id = v)
                .read_only("note", |e: &Entity| e.note.clone())
                .method("setNote", |e: &mut Entity, v: Option<String>| e.note = v)
                .default_constructor()
                .build()
        })
    }
}

/// Inherits `id` and `note` from [`Entity`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Customer {
    pub entity: Entity,
    pub name: String,
    pub age: i32,
    pub joined: Option<NaiveDate>,
}

impl Bean for Customer {
    fn bean_type() -> &'static BeanType {
        static TYPE: OnceLock<BeanType> = OnceLock::new();
        TYPE.get_or_init(|| {
            BeanType::builder::<Customer>("Customer")
                .extends(|c: &Customer| &c.entity, |c: &mut Customer| &mut c.entity)
                .property("name", |c: &Customer| c.name.clone(), |c: &mut Customer, v| c.name = v)
                .property("age", |c: &Customer| c.age, |c: &mut Customer, v| c.age = v)
                .property("joined", |c: &Customer| c.joined, |c: &mut Customer, v| c.joined = v)
                .default_constructor()
                .build()
        })
    }
}

/// Destination with underscore names and a date-time field
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomerRow {
    pub id: i64,
    pub name: String,
    pub joined: Option<chrono::DateTime<chrono::Utc>>,
}

impl Bean for CustomerRow {
    fn bean_type() -> &'static BeanType {
        static TYPE: OnceLock<BeanType> = OnceLock::new();
        TYPE.get_or_init(|| {
            BeanType::builder::<CustomerRow>("CustomerRow")
                .property("id", |c: &CustomerRow| c.id, |c: &mut CustomerRow, v| c.id = v)
                .property(
                    "name",
                    |c: &CustomerRow| c.name.clone(),
                    |c: &mut CustomerRow, v| c.name = v,
                )
                .property(
                    "joined",
                    |c: &CustomerRow| c.joined,
                    |c: &mut CustomerRow, v| c.joined = v,
                )
                .default_constructor()
                .build()
        })
    }
}

/// Registered without a construction path
#[derive(Debug, Default)]
pub struct Unbuildable {
    pub name: String,
}

impl Bean for Unbuildable {
    fn bean_type() -> &'static BeanType {
        static TYPE: OnceLock<BeanType> = OnceLock::new();
        TYPE.get_or_init(|| {
            BeanType::builder::<Unbuildable>("Unbuildable")
                .property(
                    "name",
                    |u: &Unbuildable| u.name.clone(),
                    |u: &mut Unbuildable, v| u.name = v,
                )
                .build()
        })
    }
}

/// Constructor always fails
#[derive(Debug)]
pub struct Faulty {
    pub name: String,
}

impl Bean for Faulty {
    fn bean_type() -> &'static BeanType {
        static TYPE: OnceLock<BeanType> = OnceLock::new();
        TYPE.get_or_init(|| {
            BeanType::builder::<Faulty>("Faulty")
                .property("name", |f: &Faulty| f.name.clone(), |f: &mut Faulty, v| f.name = v)
                .constructor(|| Err::<Faulty, _>("connection refused"))
                .build()
        })
    }
}

/// A string-keyed mapping type; never a valid destination
#[derive(Debug, Default)]
pub struct Attributes {
    pub entries: HashMap<String, Value>,
}

impl Bean for Attributes {
    fn bean_type() -> &'static BeanType {
        static TYPE: OnceLock<BeanType> = OnceLock::new();
        TYPE.get_or_init(|| {
            BeanType::builder::<Attributes>("Attributes")
                .string_keyed()
                .default_constructor()
                .build()
        })
    }
}

/// Property registered as `XUrl`, the form some naming tools emit for `xUrl`.
/// `host` has neither a setter nor a `setHost` method.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Link {
    pub url: String,
    pub host: String,
}

impl Bean for Link {
    fn bean_type() -> &'static BeanType {
        static TYPE: OnceLock<BeanType> = OnceLock::new();
        TYPE.get_or_init(|| {
            BeanType::builder::<Link>("Link")
                .property("XUrl", |l: &Link| l.url.clone(), |l: &mut Link, v| l.url = v)
                .read_only("host", |l: &Link| l.host.clone())
                .default_constructor()
                .build()
        })
    }
}
