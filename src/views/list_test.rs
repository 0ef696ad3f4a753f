use uuid::Uuid;

use super::*;
use crate::api::models::Member;
use crate::state::test_helpers::sample_user;

fn member(name: &str) -> Member {
    Member {
        id: Uuid::nil(),
        name: name.into(),
        cpf: "52998224725".into(),
        email: None,
        phone: None,
        status: None,
        client: None,
    }
}

fn snapshot(items: Vec<Member>, total: u64, error: Option<&str>, query: &ListQuery) -> ListSnapshot {
    let outcome = ListOutcome { items, total, error: error.map(str::to_owned) };
    ListSnapshot::new(ResourceKind::Members, &outcome, query)
}

#[test]
fn snapshot_turns_items_into_cells() {
    let snap = snapshot(vec![member("Ana")], 25, None, &ListQuery::new(10));
    assert_eq!(snap.headers, Member::HEADERS);
    assert_eq!(snap.rows, vec![member("Ana").cells()]);
    assert_eq!(snap.pages, 3);
}

#[test]
fn fragment_escapes_cells() {
    let html = list_fragment(&snapshot(vec![member("<script>x</script>")], 1, None, &ListQuery::new(10)));
    assert!(html.contains("&lt;script&gt;"));
    assert!(!html.contains("<script>"));
    assert!(html.contains("529.982.247-25"));
}

#[test]
fn empty_list_spans_all_columns() {
    let html = list_fragment(&snapshot(Vec::new(), 0, None, &ListQuery::new(10)));
    assert!(html.contains("Nenhum registro encontrado"));
    assert!(html.contains(r#"colspan="5""#));
    assert!(html.contains("Página 1 de 1"));
    assert!(!html.contains(r#"rel="next""#));
}

#[test]
fn fragment_shows_error_toast() {
    let html = list_fragment(&snapshot(Vec::new(), 0, Some("Sem permissão"), &ListQuery::new(10)));
    assert!(html.contains("toast-error"));
    assert!(html.contains("Sem permissão"));
}

#[test]
fn list_page_has_filters_import_and_pagination() {
    let mut query = ListQuery::new(10);
    query.page = 2;
    let html = list_page(&sample_user(), &snapshot(vec![member("Ana")], 25, None, &query));
    assert!(html.contains("Página 2 de 3"));
    assert!(html.contains(r#"href="/painel/membros?page=1""#));
    assert!(html.contains(r#"href="/painel/membros?page=3""#));
    assert!(html.contains("data-import"));
    assert!(html.contains(r#"data-live="/painel/membros/data""#));
    assert!(html.contains(r#"id="list-body""#));
}

#[test]
fn only_members_offer_import() {
    let outcome: ListOutcome<Member> = ListOutcome { items: Vec::new(), total: 0, error: None };
    let snap = ListSnapshot { kind: ResourceKind::Clients, ..ListSnapshot::new(ResourceKind::Members, &outcome, &ListQuery::new(10)) };
    assert!(!list_page(&sample_user(), &snap).contains("data-import"));
}
