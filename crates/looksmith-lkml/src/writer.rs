//! LookML text rendering

use crate::tree::{Block, Field, Value};
use std::fmt::Write;

const INDENT: &str = "  ";

/// Render a whole file from its top-level fields
pub fn dump(fields: &[Field]) -> String {
    let mut out = String::new();
    write_fields(&mut out, fields, 0);
    out
}

/// Quote a string, escaping backslashes and double quotes
pub fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

fn write_fields(out: &mut String, fields: &[Field], depth: usize) {
    for (i, field) in fields.iter().enumerate() {
        // Blocks are separated from whatever precedes them by a blank line
        if i > 0 && matches!(field.value, Value::Block(_)) {
            out.push('\n');
        }
        write_field(out, field, depth);
    }
}

fn write_field(out: &mut String, field: &Field, depth: usize) {
    let text = match &field.value {
        Value::Block(block) => return write_block(out, &field.key, block, depth),
        Value::Bare(v) => v.clone(),
        Value::Quoted(v) => quote(v),
        Value::Sql(v) => format!("{} ;;", v),
        Value::List(items) => render_list(items.iter().cloned()),
        Value::QuotedList(items) => render_list(items.iter().map(|i| quote(i))),
        Value::Pairs(pairs) => render_list(
            pairs
                .iter()
                .map(|(field, expression)| format!("{}: {}", field, quote(expression))),
        ),
    };

    let _ = writeln!(out, "{}{}: {}", INDENT.repeat(depth), field.key, text);
}

fn write_block(out: &mut String, key: &str, block: &Block, depth: usize) {
    let indent = INDENT.repeat(depth);

    match &block.name {
        Some(name) => {
            let _ = writeln!(out, "{}{}: {} {{", indent, key, name);
        }
        None => {
            let _ = writeln!(out, "{}{}: {{", indent, key);
        }
    }
    write_fields(out, &block.fields, depth + 1);
    let _ = writeln!(out, "{}}}", indent);
}

fn render_list(items: impl Iterator<Item = String>) -> String {
    format!("[{}]", items.collect::<Vec<_>>().join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn quoting_escapes() {
        assert_eq!(quote("plain"), "\"plain\"");
        assert_eq!(quote("say \"hi\""), "\"say \\\"hi\\\"\"");
        assert_eq!(quote("a\\b"), "\"a\\\\b\"");
    }

    #[test]
    fn render_view() {
        let view = Block::named("orders")
            .sql("sql_table_name", "analytics.orders")
            .list("drill_fields", vec!["details*".to_string()])
            .block(
                "dimension_group",
                Block::named("created_at")
                    .bare("type", "time")
                    .sql("sql", "${TABLE}.created_at")
                    .list("timeframes", vec!["raw".to_string(), "date".to_string()]),
            )
            .block(
                "measure",
                Block::named("completed")
                    .bare("type", "count")
                    .quoted("description", "Completed orders")
                    .pairs("filters", vec![("status".to_string(), "complete".to_string())]),
            )
            .block(
                "dimension",
                Block::named("status").opt_quoted_list(
                    "suggestions",
                    Some(&["open".to_string(), "complete".to_string()][..]),
                ),
            );

        let text = dump(&[Field::new("view", Value::Block(view))]);

        let expected = r#"view: orders {
  sql_table_name: analytics.orders ;;
  drill_fields: [details*]

  dimension_group: created_at {
    type: time
    sql: ${TABLE}.created_at ;;
    timeframes: [raw, date]
  }

  measure: completed {
    type: count
    description: "Completed orders"
    filters: [status: "complete"]
  }

  dimension: status {
    suggestions: ["open", "complete"]
  }
}
"#;
        assert_eq!(text, expected);
    }

    #[test]
    fn top_level_scalars_then_block() {
        let fields = vec![
            Field::new("connection", Value::Quoted("warehouse".to_string())),
            Field::new("include", Value::Quoted("/views/*".to_string())),
            Field::new("explore", Value::Block(Block::named("orders"))),
        ];

        assert_eq!(
            dump(&fields),
            "connection: \"warehouse\"\ninclude: \"/views/*\"\n\nexplore: orders {\n}\n"
        );
    }

    #[test]
    fn anonymous_block() {
        let fields = vec![Field::new("access_filter", Value::Block(Block::default().bare("field", "region")))];
        assert_eq!(dump(&fields), "access_filter: {\n  field: region\n}\n");
    }

    #[test]
    fn every_scalar_kind_on_one_line() {
        let fields = vec![
            Field::new("type", Value::Bare("left_outer".to_string())),
            Field::new("sql_on", Value::Sql("${a.id} = ${b.id}".to_string())),
            Field::new("fields", Value::List(Vec::new())),
            Field::new("suggestions", Value::QuotedList(vec!["a\"b".to_string()])),
            Field::new("filters", Value::Pairs(vec![("x".to_string(), ">1".to_string())])),
        ];

        assert_eq!(
            dump(&fields),
            "type: left_outer\nsql_on: ${a.id} = ${b.id} ;;\nfields: []\nsuggestions: [\"a\\\"b\"]\nfilters: [x: \">1\"]\n"
        );
    }
}
