use serde_json::json;

use super::*;
use crate::state::test_helpers::{sample_client_user, sample_user};

#[test]
fn member_decodes_camel_case_and_ignores_extra_fields() {
    let raw = json!({
        "id": "2b1f7a3c-1111-4a2b-9c3d-000000000001",
        "name": "João Lima",
        "cpf": "52998224725",
        "email": "joao@example.test",
        "createdAt": "2024-01-01T00:00:00Z",
        "status": { "id": "2b1f7a3c-1111-4a2b-9c3d-000000000002", "name": "Ativo" },
        "client": { "id": "2b1f7a3c-1111-4a2b-9c3d-000000000003", "fantasyName": "Acme" }
    });
    let member: Member = serde_json::from_value(raw).unwrap();
    assert_eq!(member.name, "João Lima");
    assert_eq!(member.phone, None);
    assert_eq!(
        member.cells(),
        vec!["João Lima", "529.982.247-25", "joao@example.test", "Acme", "Ativo"]
    );
    assert_eq!(member.cells().len(), Member::HEADERS.len());
}

#[test]
fn establishment_defaults_optional_fields() {
    let raw = json!({ "id": "2b1f7a3c-1111-4a2b-9c3d-000000000004", "fantasyName": "Padaria" });
    let est: Establishment = serde_json::from_value(raw).unwrap();
    assert!(!est.is_online);
    assert_eq!(est.cells(), vec!["Padaria", "-", "-", "-", "Não"]);
}

#[test]
fn voucher_code_row_shows_redemption() {
    let raw = json!({
        "id": "2b1f7a3c-1111-4a2b-9c3d-000000000005",
        "code": "ABC123",
        "wasRedeemed": true,
        "voucher": { "id": "2b1f7a3c-1111-4a2b-9c3d-000000000006", "title": "10% off" }
    });
    let code: VoucherCode = serde_json::from_value(raw).unwrap();
    assert_eq!(code.cells(), vec!["ABC123", "10% off", "-", "Sim"]);
}

#[test]
fn user_missing_role_is_rejected() {
    let raw = json!({ "id": "2b1f7a3c-1111-4a2b-9c3d-000000000007", "name": "A", "cpf": "1" });
    assert!(serde_json::from_value::<User>(raw).is_err());
}

#[test]
fn every_row_matches_its_header_count() {
    let client = Client {
        id: uuid::Uuid::nil(),
        fantasy_name: "Acme".into(),
        corporate_name: None,
        cnpj: "00.000.000/0001-00".into(),
        status: None,
    };
    assert_eq!(client.cells().len(), Client::HEADERS.len());
    let voucher = Voucher { id: uuid::Uuid::nil(), title: "T".into(), description: None, establishment: None, status: None };
    assert_eq!(voucher.cells().len(), Voucher::HEADERS.len());
}

#[test]
fn resource_slugs_round_trip() {
    for kind in ResourceKind::ALL {
        assert_eq!(ResourceKind::from_slug(kind.slug()), Some(kind));
        assert!(kind.endpoint().starts_with('/'));
        assert!(kind.filters().contains(&Filter::SearchInput));
    }
    assert_eq!(ResourceKind::from_slug("validar"), None);
}

#[test]
fn users_screen_hidden_from_client_users() {
    assert!(ResourceKind::Users.visible_to(&sample_user()));
    assert!(!ResourceKind::Users.visible_to(&sample_client_user()));
    assert!(ResourceKind::Members.visible_to(&sample_client_user()));
}

#[test]
fn named_refs_accept_numeric_ids() {
    let raw = json!({
        "id": "2b1f7a3c-1111-4a2b-9c3d-000000000008",
        "fantasyName": "Padaria",
        "state": { "id": 35, "name": "São Paulo" },
        "city": { "id": 3_550_308, "name": "São Paulo" },
        "category": { "name": "Alimentação" }
    });
    let est: Establishment = serde_json::from_value(raw).unwrap();
    assert_eq!(est.cells(), vec!["Padaria", "Alimentação", "São Paulo", "São Paulo", "Não"]);
}
