//! Integration tests for Sybase statement splitting

use datasource_api::prelude::*;
use datasource_sybase::{split_and_remove_comment, SybaseDataSourceProcessor};

#[test]
fn test_split_single_select() {
    let processor = SybaseDataSourceProcessor::default();
    let statements = processor
        .split_and_remove_comment("select * from table;")
        .unwrap();

    assert_eq!(statements, vec!["select * from table;"]);
}

#[test]
fn test_split_single_merge_template() {
    let sql = concat!(
        "MERGE\n",
        "    [ TOP ( expression ) [ PERCENT ] ]\n",
        "    [ INTO ] <target_table> [ WITH ( <merge_hint> ) ] [ [ AS ] table_alias ]\n",
        "    USING <table_source> [ [ AS ] table_alias ]\n",
        "    ON <merge_search_condition>\n",
        "    [ WHEN MATCHED [ AND <clause_search_condition> ]\n",
        "        THEN <merge_matched> ] [ ...n ]\n",
        "    [ WHEN NOT MATCHED [ BY TARGET ] [ AND <clause_search_condition> ]\n",
        "        THEN <merge_not_matched> ]\n",
        "    [ WHEN NOT MATCHED BY SOURCE [ AND <clause_search_condition> ]\n",
        "        THEN <merge_matched> ] [ ...n ]\n",
        "    [ <output_clause> ]\n",
        "    [ OPTION ( <query_hint> [ ,...n ] ) ];"
    );

    let statements = split_and_remove_comment(sql).unwrap();

    assert_eq!(statements.len(), 1);
    assert_eq!(statements[0], sql);
}

#[test]
fn test_split_script_with_procedure() {
    let sql = concat!(
        "-- setup\n",
        "create table #orders (id int, total money);\n",
        "/* load */\n",
        "insert into #orders values (1, 10.5);\n",
        "create procedure sp_total @id int as\n",
        "begin\n",
        "    select @@rowcount;\n",
        "    select total from #orders where id = @id;\n",
        "end;\n",
        "exec sp_total 1"
    );

    let statements = split_and_remove_comment(sql).unwrap();

    assert_eq!(statements.len(), 4);
    assert_eq!(statements[0], "create table #orders (id int, total money);");
    assert_eq!(statements[1], "insert into #orders values (1, 10.5);");
    assert!(statements[2].starts_with("create procedure sp_total @id int as\nbegin"));
    assert!(statements[2].ends_with("end;"));
    assert!(statements[2].contains("select @@rowcount;"));
    assert_eq!(statements[3], "exec sp_total 1;");
}

#[test]
fn test_split_transaction() {
    let sql = "begin transaction; update t set a = 1; commit transaction;";

    let statements = split_and_remove_comment(sql).unwrap();

    assert_eq!(
        statements,
        vec![
            "begin transaction;",
            "update t set a = 1;",
            "commit transaction;"
        ]
    );
}

#[test]
fn test_split_every_statement_terminated() {
    let statements = split_and_remove_comment("select 1;\n\nselect 2\n;;select 3").unwrap();

    assert_eq!(statements.len(), 3);
    assert!(statements.iter().all(|s| s.ends_with(';')));
    assert!(statements.iter().all(|s| !s.ends_with(";;")));
}

#[test]
fn test_split_unterminated_comment() {
    let err = split_and_remove_comment("select 1 /* never closed").unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Parse);
}

#[test]
fn test_split_keeps_doubled_quote_escapes() {
    let sql = "insert into t values ('it''s', 'a''''b')";

    let statements = split_and_remove_comment(sql).unwrap();

    assert_eq!(statements, vec![format!("{};", sql)]);
}

#[test]
fn test_split_keeps_doubled_quote_identifiers() {
    let sql = "select \"a\"\"b\", [c d] from t";

    let statements = split_and_remove_comment(sql).unwrap();

    assert_eq!(statements, vec![format!("{};", sql)]);
}

#[test]
fn test_split_keeps_hex_literals() {
    let sql = "select 0x1F, 0xdeadBEEF from t where flags & 0x01 = 0x01";

    let statements = split_and_remove_comment(sql).unwrap();

    assert_eq!(statements, vec![format!("{};", sql)]);
}

#[test]
fn test_split_keeps_operator_spelling() {
    let sql = "select a from t where a != b and c <> d and f >= 2";

    let statements = split_and_remove_comment(sql).unwrap();

    assert_eq!(statements, vec![format!("{};", sql)]);
}

#[test]
fn test_split_comment_next_to_escaped_literals() {
    let sql = concat!(
        "update t set note = 'won''t' -- keep the quote\n",
        "where id != 0x0A /* hex id */;\n",
        "select 'x;y'"
    );

    let statements = split_and_remove_comment(sql).unwrap();

    assert_eq!(
        statements,
        vec![
            "update t set note = 'won''t' \nwhere id != 0x0A;",
            "select 'x;y';"
        ]
    );
}
