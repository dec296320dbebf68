//! Shared fixture entities for model tests.

#![allow(dead_code)]

use apiobject_model::{
    ApiObject, Error, Field, Payload, PropertyTable, Result, Timestamp, impl_api_display,
};
use serde_json::{Value, json};
use std::sync::LazyLock;

/// Installs a test subscriber once; honours `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// ── Order: id / name / createdAt ─────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Order {
    pub id: i64,
    pub name: String,
    pub created_at: Option<Timestamp>,
}

static ORDER_PROPERTIES: LazyLock<PropertyTable<Order>> = LazyLock::new(|| {
    PropertyTable::<Order>::new()
        .property("id", |o| Field::value(o.id), |o, v| {
            o.id = v.int(0);
            Ok(())
        })
        .property("name", |o| Field::value(o.name.clone()), |o, v| {
            o.name = v.string("");
            Ok(())
        })
        .property("createdAt", |o| Field::timestamp(o.created_at.as_ref()), |o, v| {
            o.created_at = v.timestamp();
            Ok(())
        })
});

impl ApiObject for Order {
    fn properties() -> &'static PropertyTable<Self> {
        &ORDER_PROPERTIES
    }
}

impl_api_display!(Order);

// ── Address / Customer: nesting ──────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub zip: String,
}

static ADDRESS_PROPERTIES: LazyLock<PropertyTable<Address>> = LazyLock::new(|| {
    PropertyTable::<Address>::new()
        .property("street", |a| Field::value(a.street.clone()), |a, v| {
            a.street = v.string("");
            Ok(())
        })
        .property("city", |a| Field::value(a.city.clone()), |a, v| {
            a.city = v.string("");
            Ok(())
        })
        .property("zip", |a| Field::value(a.zip.clone()), |a, v| {
            a.zip = v.string("");
            Ok(())
        })
});

impl ApiObject for Address {
    fn properties() -> &'static PropertyTable<Self> {
        &ADDRESS_PROPERTIES
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Customer {
    pub id: i64,
    pub email: String,
    pub active: u8,
    pub tags: Value,
    pub address: Address,
    pub billing: Option<Address>,
    pub orders: Vec<Order>,
}

static CUSTOMER_PROPERTIES: LazyLock<PropertyTable<Customer>> = LazyLock::new(|| {
    PropertyTable::<Customer>::new()
        .property("id", |c| Field::value(c.id), |c, v| {
            c.id = v.int_min(0, 1);
            Ok(())
        })
        .property("email", |c| Field::value(c.email.clone()), |c, v| {
            c.email = v.string("");
            Ok(())
        })
        .property("active", |c| Field::value(c.active), |c, v| {
            c.active = v.flag(0);
            Ok(())
        })
        .property("tags", |c| Field::value(c.tags.clone()), |c, v| {
            c.tags = v.array(json!([]));
            Ok(())
        })
        .property("address", |c| Field::entity(&c.address), |c, v| {
            c.address = v.entity()?;
            Ok(())
        })
        .property("billing", |c| Field::optional_entity(c.billing.as_ref()), |c, v| {
            c.billing = v.optional_entity()?;
            Ok(())
        })
        .property("orders", |c| Field::entities(&c.orders), |c, v| {
            c.orders = v.entities()?;
            Ok(())
        })
});

impl ApiObject for Customer {
    fn properties() -> &'static PropertyTable<Self> {
        &CUSTOMER_PROPERTIES
    }
}

impl_api_display!(Customer);

// ── Product: specialized exporter and a validating setter ────────

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Product {
    pub sku: String,
    pub price_cents: i64,
    pub quantity: i64,
}

fn export_price(p: &Product) -> Value {
    json!(format!("{}.{:02}", p.price_cents / 100, p.price_cents % 100))
}

static PRODUCT_PROPERTIES: LazyLock<PropertyTable<Product>> = LazyLock::new(|| {
    PropertyTable::<Product>::new()
        .property("sku", |p| Field::value(p.sku.clone()), |p, v| {
            p.sku = v.string("");
            Ok(())
        })
        .property_with_exporter(
            "price",
            |p| Field::value(p.price_cents),
            |p, v| {
                p.price_cents = v.int(0);
                Ok(())
            },
            export_price,
        )
        .property("quantity", |p| Field::value(p.quantity), |p, v| {
            let quantity = v.int(0);
            if quantity < 0 {
                return Err(Error::InvalidValue(format!("negative quantity {quantity}")));
            }
            p.quantity = quantity;
            Ok(())
        })
});

impl ApiObject for Product {
    fn properties() -> &'static PropertyTable<Self> {
        &PRODUCT_PROPERTIES
    }
}

// ── Permissions: keyed or list-like payloads ─────────────────────

/// Accepts either `{"read": 1, "write": 0}` or `["read", "write"]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Permissions {
    pub read: u8,
    pub write: u8,
}

static PERMISSION_PROPERTIES: LazyLock<PropertyTable<Permissions>> = LazyLock::new(|| {
    PropertyTable::<Permissions>::new()
        .property("read", |p| Field::value(p.read), |p, v| {
            p.read = v.flag(0);
            Ok(())
        })
        .property("write", |p| Field::value(p.write), |p, v| {
            p.write = v.flag(0);
            Ok(())
        })
});

impl ApiObject for Permissions {
    fn properties() -> &'static PropertyTable<Self> {
        &PERMISSION_PROPERTIES
    }

    fn parse(&mut self, payload: &Payload) -> Result<()> {
        let keyed = Self::properties().names().any(|name| payload.has(name));
        if keyed {
            return Self::properties().bind(self, payload);
        }
        self.read = payload.get_list_flag("read");
        self.write = payload.get_list_flag("write");
        Ok(())
    }
}
