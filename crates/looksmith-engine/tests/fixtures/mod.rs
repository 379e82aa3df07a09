//! Test fixtures for end-to-end translation tests
//!
//! A small jaffle-shop style project compiled against Postgres:
//! - `orders`: timestamp, scalar and measure-carrying columns, one join
//! - `customers`: an opt-in date group and formatted dimensions
//! - `stg_payments`: never materialized, so absent from the catalog
//! - one test node that must pass through untranslated

use looksmith_dbt::{apply_catalog_types, select_models, validate_manifest, Catalog, Manifest, TypedModels};
use looksmith_core::Dialect;

/// Manifest with two translatable models, one unmaterialized model and a test
pub const MANIFEST: &str = r#"{
  "metadata": {"adapter_type": "postgres", "dbt_version": "1.7.4"},
  "nodes": {
    "model.jaffle_shop.orders": {
      "unique_id": "model.jaffle_shop.orders",
      "resource_type": "model",
      "name": "orders",
      "schema": "analytics",
      "relation_name": "\"jaffle\".\"analytics\".\"orders\"",
      "description": "One row per order",
      "tags": ["looker"],
      "columns": {
        "order_id": {
          "name": "order_id",
          "description": "Primary key",
          "meta": {"dimension": {"primary_key": true}}
        },
        "created_at": {"name": "created_at", "description": "", "meta": {}},
        "status": {
          "name": "status",
          "description": "Order status",
          "meta": {"dimension": {"suggestions": ["placed", "shipped", "completed"]}}
        },
        "amount": {
          "name": "amount",
          "description": "",
          "meta": {
            "measures": {"total_amount": {"type": "sum"}},
            "metric": {
              "completed_amount": {
                "type": "sum",
                "filters": [{"status": "completed"}],
                "value_format_name": "usd"
              }
            }
          }
        },
        "Customer_ID": {
          "name": "Customer_ID",
          "description": "",
          "data_type": "integer",
          "meta": {"measure": {"customers": {"type": "count_distinct"}}}
        },
        "search_vector": {"name": "search_vector", "description": "", "meta": {}}
      },
      "config": {
        "meta": {
          "label": "Orders",
          "joins": [
            {"join": "customers", "sql_on": "${orders.customer_id} = ${customers.customer_id}"}
          ]
        }
      }
    },
    "model.jaffle_shop.customers": {
      "unique_id": "model.jaffle_shop.customers",
      "resource_type": "model",
      "name": "customers",
      "schema": "analytics",
      "relation_name": "\"jaffle\".\"analytics\".\"customers\"",
      "description": "Customer dimension\nOne row per customer",
      "tags": ["looker"],
      "columns": {
        "customer_id": {"name": "customer_id", "description": "Customer key", "meta": {}},
        "first_order": {
          "name": "first_order",
          "description": "",
          "meta": {
            "dimension": {
              "enabled": true,
              "description": "Date of first order",
              "timeframes": ["date", "month"]
            }
          }
        },
        "lifetime_value": {
          "name": "lifetime_value",
          "description": "Total spend\nacross all orders",
          "meta": {"dimension": {"value_format_name": "usd", "label": "LTV"}}
        }
      }
    },
    "model.jaffle_shop.stg_payments": {
      "unique_id": "model.jaffle_shop.stg_payments",
      "resource_type": "model",
      "name": "stg_payments",
      "schema": "staging",
      "relation_name": "\"jaffle\".\"staging\".\"stg_payments\"",
      "columns": {}
    },
    "test.jaffle_shop.not_null_orders_order_id": {
      "unique_id": "test.jaffle_shop.not_null_orders_order_id",
      "resource_type": "test"
    }
  }
}"#;

/// Catalog for the materialized models
pub const CATALOG: &str = r#"{
  "nodes": {
    "model.jaffle_shop.orders": {
      "metadata": {"type": "BASE TABLE", "schema": "analytics", "name": "orders", "comment": null, "owner": "jaffle"},
      "columns": {
        "order_id": {"type": "integer", "comment": null, "index": 1, "name": "order_id"},
        "created_at": {"type": "timestamp without time zone", "comment": null, "index": 2, "name": "created_at"},
        "status": {"type": "text", "comment": null, "index": 3, "name": "status"},
        "amount": {"type": "numeric", "comment": null, "index": 4, "name": "amount"},
        "customer_id": {"type": "bigint", "comment": null, "index": 5, "name": "customer_id"},
        "search_vector": {"type": "tsvector", "comment": null, "index": 6, "name": "search_vector"}
      }
    },
    "model.jaffle_shop.customers": {
      "metadata": {"type": "BASE TABLE", "schema": "analytics", "name": "customers", "comment": null, "owner": "jaffle"},
      "columns": {
        "customer_id": {"type": "integer", "comment": null, "index": 1, "name": "customer_id"},
        "first_order": {"type": "date", "comment": null, "index": 2, "name": "first_order"},
        "lifetime_value": {"type": "numeric", "comment": null, "index": 3, "name": "lifetime_value"}
      }
    }
  }
}"#;

/// Parse, validate, select by tag and merge catalog types
pub fn typed_models(tag: Option<&str>) -> (Dialect, TypedModels) {
    let manifest = Manifest::from_str(MANIFEST).expect("fixture manifest parses");
    let catalog = Catalog::from_str(CATALOG).expect("fixture catalog parses");
    let validated = validate_manifest(&manifest).expect("fixture manifest validates");
    let dialect = validated.dialect;

    let models = select_models(validated.into_models(), tag);
    (dialect, apply_catalog_types(models, &catalog, dialect))
}
