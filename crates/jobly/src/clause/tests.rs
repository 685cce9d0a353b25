use super::*;

fn payload(entries: &[(&str, SqlValue)]) -> IndexMap<String, SqlValue> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

fn user_field_map() -> FieldMap {
    [
        ("firstName", "first_name"),
        ("lastName", "last_name"),
        ("isAdmin", "is_admin"),
    ]
    .into_iter()
    .collect()
}

/// Placeholder indices in order of appearance.
fn placeholders(sql: &str) -> Vec<usize> {
    sql.split('$')
        .skip(1)
        .map(|rest| {
            rest.chars()
                .take_while(char::is_ascii_digit)
                .collect::<String>()
                .parse()
                .unwrap()
        })
        .collect()
}

// ==================== SET clause ====================

#[test]
fn set_clause_maps_fields_and_keeps_order() {
    let data = payload(&[("firstName", "Aliya".into()), ("age", 32.into())]);
    let clause = build_set_clause(&data, &user_field_map()).unwrap();

    assert_eq!(clause.sql, r#""first_name"=$1, "age"=$2"#);
    assert_eq!(clause.values, vec![SqlValue::from("Aliya"), SqlValue::Int(32)]);
    assert_eq!(clause.next_placeholder(), 3);
}

#[test]
fn set_clause_rejects_empty_payload() {
    let err = build_set_clause(&UpdatePayload::new(), &user_field_map()).unwrap_err();
    assert!(matches!(err, JoblyError::InvalidInput(ref m) if m == "No data"));
    assert!(err.is_bad_request());
}

#[test]
fn set_clause_with_empty_field_map_uses_field_names() {
    let data = payload(&[("firstName", "Aliya".into()), ("age", 32.into())]);
    let clause = build_set_clause(&data, &FieldMap::new()).unwrap();

    assert_eq!(clause.sql, r#""firstName"=$1, "age"=$2"#);
    assert_eq!(clause.values, vec![SqlValue::from("Aliya"), SqlValue::Int(32)]);
}

#[test]
fn set_clause_preserves_value_types_including_null() {
    let data = payload(&[
        ("logoUrl", SqlValue::Null),
        ("numEmployees", 0.into()),
        ("description", "".into()),
    ]);
    let clause = build_set_clause(&data, &company_field_map()).unwrap();

    assert_eq!(
        clause.sql,
        r#""logo_url"=$1, "num_employees"=$2, "description"=$3"#
    );
    assert_eq!(
        clause.values,
        vec![SqlValue::Null, SqlValue::Int(0), SqlValue::Text(String::new())]
    );
}

#[test]
fn set_clause_rejects_unsafe_field_names() {
    let data = payload(&[(r#"name"=1; DROP TABLE companies; --"#, "x".into())]);
    let err = build_set_clause(&data, &FieldMap::new()).unwrap_err();
    assert!(err.is_bad_request());

    let data = payload(&[("c.name", "x".into())]);
    assert!(build_set_clause(&data, &FieldMap::new()).is_err());
}

#[test]
fn set_clause_placeholders_are_contiguous() {
    let data: UpdatePayload = (0..12)
        .map(|i| (format!("field{i}"), SqlValue::Int(i)))
        .collect();
    let clause = build_set_clause(&data, &FieldMap::new()).unwrap();

    assert_eq!(placeholders(&clause.sql), (1..=12).collect::<Vec<_>>());
    assert_eq!(clause.values.len(), data.len());
    assert_eq!(clause.values, data.values().cloned().collect::<Vec<_>>());
}

// ==================== WHERE clause ====================

#[test]
fn where_clause_three_filters() {
    let query = payload(&[
        ("minEmployees", 100.into()),
        ("maxEmployees", 500.into()),
        ("nameLike", "ibm".into()),
    ]);
    let clause = build_where_clause(&query, &company_filter_spec());

    assert_eq!(
        clause.sql,
        "WHERE num_employees >= $1 AND num_employees <= $2 AND name ILIKE $3"
    );
    assert_eq!(
        clause.values,
        vec![SqlValue::Int(100), SqlValue::Int(500), SqlValue::from("%ibm%")]
    );
}

#[test]
fn where_clause_two_filters() {
    let query = payload(&[("minEmployees", 100.into()), ("maxEmployees", 500.into())]);
    let clause = build_where_clause(&query, &company_filter_spec());

    assert_eq!(
        clause.sql,
        "WHERE num_employees >= $1 AND num_employees <= $2"
    );
    assert_eq!(clause.values, vec![SqlValue::Int(100), SqlValue::Int(500)]);
}

#[test]
fn where_clause_single_pattern_filter() {
    let query = payload(&[("nameLike", "ibm".into())]);
    let clause = build_where_clause(&query, &company_filter_spec());

    assert_eq!(clause.sql, "WHERE name ILIKE $1");
    assert_eq!(clause.values, vec![SqlValue::from("%ibm%")]);
}

#[test]
fn where_clause_empty_query_is_empty() {
    let clause = build_where_clause(&QueryPayload::new(), &company_filter_spec());
    assert!(clause.is_empty());
    assert_eq!(clause, Clause::default());
}

#[test]
fn where_clause_unknown_keys_only_is_empty() {
    let query = payload(&[("invalid", "invalid".into())]);
    let clause = build_where_clause(&query, &company_filter_spec());

    assert_eq!(clause.sql, "");
    assert!(clause.values.is_empty());
}

#[test]
fn where_clause_mixed_keys_keep_valid_in_order() {
    let query = payload(&[
        ("invalid", "invalid".into()),
        ("nameLike", "ibm".into()),
        ("invalid2", "invalid2".into()),
        ("minEmployees", 100.into()),
        ("invalid3", "invalid3".into()),
    ]);
    let clause = build_where_clause(&query, &company_filter_spec());

    assert_eq!(clause.sql, "WHERE name ILIKE $1 AND num_employees >= $2");
    assert_eq!(
        clause.values,
        vec![SqlValue::from("%ibm%"), SqlValue::Int(100)]
    );
}

#[test]
fn where_clause_keeps_zero_and_false() {
    let spec = FilterSpec::new()
        .rule("minEmployees", "num_employees", FilterOp::Gte)
        .rule("remote", "remote", FilterOp::Eq);
    let query = payload(&[("minEmployees", 0.into()), ("remote", false.into())]);
    let clause = build_where_clause(&query, &spec);

    assert_eq!(clause.sql, "WHERE num_employees >= $1 AND remote = $2");
    assert_eq!(clause.values, vec![SqlValue::Int(0), SqlValue::Bool(false)]);
}

#[test]
fn where_clause_skips_null_and_empty_string_without_gaps() {
    let query = payload(&[
        ("nameLike", "".into()),
        ("minEmployees", SqlValue::Null),
        ("maxEmployees", 10.into()),
    ]);
    let clause = build_where_clause(&query, &company_filter_spec());

    assert_eq!(clause.sql, "WHERE num_employees <= $1");
    assert_eq!(clause.values, vec![SqlValue::Int(10)]);
}

#[test]
fn where_clause_only_wraps_pattern_operators() {
    let spec = FilterSpec::new()
        .rule("name", "name", FilterOp::Eq)
        .rule("nameLike", "name", FilterOp::ILike);
    let query = payload(&[("name", "ibm".into()), ("nameLike", "ibm".into())]);
    let clause = build_where_clause(&query, &spec);

    assert_eq!(clause.sql, "WHERE name = $1 AND name ILIKE $2");
    assert_eq!(
        clause.values,
        vec![SqlValue::from("ibm"), SqlValue::from("%ibm%")]
    );
}

#[test]
fn where_clause_predicates_match_accepted_keys() {
    let spec = company_filter_spec();
    let query: QueryPayload = (0..20)
        .map(|i| {
            let key = match i % 4 {
                0 => "minEmployees".to_string(),
                1 => format!("unknown{i}"),
                2 => "nameLike".to_string(),
                _ => format!("other{i}"),
            };
            (key, SqlValue::Int(i))
        })
        .collect();
    let clause = build_where_clause(&query, &spec);

    let accepted = query.keys().filter(|k| spec.contains_key(k)).count();
    assert_eq!(clause.sql.matches(" AND ").count() + 1, accepted);
    assert_eq!(clause.values.len(), accepted);
    assert_eq!(placeholders(&clause.sql), (1..=accepted).collect::<Vec<_>>());
}

#[test]
fn clause_params_align_with_values() {
    let query = payload(&[("minEmployees", 1.into()), ("nameLike", "a".into())]);
    let clause = build_where_clause(&query, &company_filter_spec());
    assert_eq!(clause.params().len(), clause.values.len());
    assert!(clause.sql.starts_with("WHERE "));
    assert_eq!(clause.values.len(), 2);
}

#[test]
#[should_panic(expected = "not a valid identifier")]
fn filter_spec_rejects_malformed_column() {
    let _ = FilterSpec::new().rule("nameLike", "name; DROP TABLE companies", FilterOp::ILike);
}

// ==================== Jobs filter ====================

#[test]
fn job_filter_three_filters() {
    let query = payload(&[
        ("minSalary", 1000.into()),
        ("hasEquity", true.into()),
        ("title", "test".into()),
    ]);
    let clause = build_job_where_clause(&query);

    assert_eq!(
        clause.sql,
        "WHERE salary >= $1 AND equity > $2 AND title ILIKE $3"
    );
    assert_eq!(
        clause.values,
        vec![
            SqlValue::Int(1000),
            SqlValue::from(EQUITY_THRESHOLD),
            SqlValue::from("%test%"),
        ]
    );
}

#[test]
fn job_filter_has_equity_ignores_supplied_value() {
    for supplied in [
        SqlValue::Bool(true),
        SqlValue::Bool(false),
        SqlValue::from("yes"),
        SqlValue::Int(5),
    ] {
        let query = payload(&[("hasEquity", supplied)]);
        let clause = build_job_where_clause(&query);
        assert_eq!(clause.sql, "WHERE equity > $1");
        assert_eq!(clause.values, vec![SqlValue::from("0.0")]);
    }
}

#[test]
fn job_filter_mixed_keys_keep_valid_in_order() {
    let query = payload(&[
        ("invalid", "invalid".into()),
        ("title", "test".into()),
        ("invalid2", "invalid2".into()),
        ("minSalary", 1000.into()),
        ("invalid3", "invalid3".into()),
    ]);
    let clause = build_job_where_clause(&query);

    assert_eq!(clause.sql, "WHERE title ILIKE $1 AND salary >= $2");
    assert_eq!(
        clause.values,
        vec![SqlValue::from("%test%"), SqlValue::Int(1000)]
    );
}

#[test]
fn job_filter_without_known_keys_is_empty() {
    assert!(build_job_where_clause(&QueryPayload::new()).is_empty());
    assert!(build_job_where_clause(&payload(&[("invalid", "x".into())])).is_empty());
}

#[test]
fn normalize_job_query_keeps_order_and_other_values() {
    let query = payload(&[
        ("title", "dev".into()),
        ("hasEquity", false.into()),
        ("minSalary", 10.into()),
    ]);
    let normalized = normalize_job_query(&query);

    assert_eq!(
        normalized.keys().map(String::as_str).collect::<Vec<_>>(),
        vec!["title", "hasEquity", "minSalary"]
    );
    assert_eq!(normalized["hasEquity"], SqlValue::from("0.0"));
    assert_eq!(normalized["title"], SqlValue::from("dev"));
    // the caller's query is untouched
    assert_eq!(query["hasEquity"], SqlValue::Bool(false));
}

#[test]
fn presets_declare_expected_keys() {
    assert_eq!(
        company_filter_spec().keys().collect::<Vec<_>>(),
        vec!["minEmployees", "maxEmployees", "nameLike"]
    );
    assert_eq!(
        job_filter_spec().keys().collect::<Vec<_>>(),
        vec!["minSalary", "hasEquity", "title"]
    );
    assert_eq!(
        job_filter_spec().get("hasEquity"),
        Some(&FilterRule {
            column: "equity",
            op: FilterOp::Gt
        })
    );
    assert_eq!(job_field_map().column_for("salary"), "salary");
    assert_eq!(company_field_map().column_for("logoUrl"), "logo_url");
}

#[test]
fn payload_deserializes_in_key_order() {
    let data: UpdatePayload =
        serde_json::from_str(r#"{"logoUrl": "http://x", "name": "C1", "numEmployees": 7}"#)
            .unwrap();
    let clause = build_set_clause(&data, &company_field_map()).unwrap();

    assert_eq!(
        clause.sql,
        r#""logo_url"=$1, "name"=$2, "num_employees"=$3"#
    );
    assert_eq!(
        clause.values,
        vec![
            SqlValue::from("http://x"),
            SqlValue::from("C1"),
            SqlValue::Int(7)
        ]
    );
}
