//! SQL builder helpers for count queries against SQL-speaking engines.

use common::constraints::ConstraintSet;
use common::filter::{Compare, MetaPredicate, MetaValue};

pub const SQL_FROM_CLAUSE: &'static str = "FROM products";


/// Renders the WHERE clause for one constraint set. Taxonomy names and
/// metadata keys come from static configuration, not request input, so
/// they are interpolated as identifiers; every value goes through
/// `QuotedData`.
pub fn build_where_clause(constraints: &ConstraintSet) -> String {
    let mut terms = Vec::new();

    if !constraints.post_type.is_empty() {
        terms.push(format!(
            "post_type IN ({})",
            format_sql_query::QuotedData(&constraints.post_type)
        ));
    }
    if !constraints.post_status.is_empty() {
        terms.push(format!(
            "post_status = {}",
            format_sql_query::QuotedData(&constraints.post_status)
        ));
    }

    let search_text = constraints.search_text.trim().replace("@", "\\@");
    if !search_text.is_empty() {
        terms.push(format!(
            "MATCH({}, products)",
            format_sql_query::QuotedData(&search_text)
        ));
    }

    for (taxonomy, wanted) in constraints.taxonomy_terms.iter() {
        let values_str = wanted
            .iter()
            .map(|term| format_sql_query::QuotedData(term).to_string())
            .collect::<Vec<String>>()
            .join(", ");
        terms.push(format!("{taxonomy} IN ({values_str})"));
    }

    for predicate in constraints.meta_filters.values() {
        terms.push(build_predicate_condition(predicate));
    }

    // a fully unscoped constraint set has nothing to filter on
    if terms.is_empty() {
        return String::new();
    }

    format!(
        "WHERE {}",
        terms.join("
        AND ")
    )
}

fn build_predicate_condition(predicate: &MetaPredicate) -> String {
    let key = &predicate.key;
    match predicate.compare {
        Compare::Equal => format!("{key} = {}", sql_value(&predicate.value)),
        Compare::NotEqual => format!("{key} != {}", sql_value(&predicate.value)),
        Compare::In => {
            let values_str = match &predicate.value {
                MetaValue::List(values) => values
                    .iter()
                    .map(|v| sql_value(v))
                    .collect::<Vec<String>>()
                    .join(", "),
                other => sql_value(other),
            };
            format!("{key} IN ({values_str})")
        }
    }
}

fn sql_value(value: &MetaValue) -> String {
    match value {
        MetaValue::String(s) => format_sql_query::QuotedData(s).to_string(),
        MetaValue::Int(i) => i.to_string(),
        MetaValue::List(values) => values
            .iter()
            .map(|v| sql_value(v))
            .collect::<Vec<String>>()
            .join(", "),
    }
}

/// One SELECT covering every per-filter count: an independent scalar
/// subquery per filter, aliased by the filter id, each counting
/// distinct product ids. Filter ids are slug-sanitized at resolve time
/// and declared in static configuration, so they are safe aliases.
pub fn build_batched_count_select(requests: &[(String, ConstraintSet)]) -> String {
    let subqueries = requests
        .iter()
        .map(|(filter_id, constraints)| {
            let where_clause = build_where_clause(constraints);
            format!(
                "( SELECT COUNT( DISTINCT products.id ) {SQL_FROM_CLAUSE}
        {where_clause} ) AS {filter_id}"
            )
        })
        .collect::<Vec<String>>()
        .join(",
    ");

    format!(
        "
    SELECT
    {subqueries}
    {SQL_FROM_CLAUSE}
    LIMIT 1
    ;"
    )
}

pub fn build_single_count_select(constraints: &ConstraintSet) -> String {
    let where_clause = build_where_clause(constraints);
    format!(
        "
    SELECT COUNT( DISTINCT products.id ) AS total_count
    {SQL_FROM_CLAUSE}
    {where_clause}
    ;"
    )
}
