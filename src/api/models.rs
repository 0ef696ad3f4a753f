//! Backend resource types.
//!
//! One type per resource, decoded at the dispatcher boundary, so every screen
//! consumes the same verified shape. Fields the dashboard does not display are
//! left out; serde ignores them.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::list::Filter;
use crate::session::ClientRef;

/// Display name of a status, category, city or state. Only `name` is read;
/// the backend's id may be a UUID or a numeric code and is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Named {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: Uuid,
    pub name: String,
    pub cpf: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub status: Option<Named>,
    #[serde(default)]
    pub client: Option<ClientRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: Uuid,
    pub fantasy_name: String,
    #[serde(default)]
    pub corporate_name: Option<String>,
    pub cnpj: String,
    #[serde(default)]
    pub status: Option<Named>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Establishment {
    pub id: Uuid,
    pub fantasy_name: String,
    #[serde(default)]
    pub category: Option<Named>,
    #[serde(default)]
    pub city: Option<Named>,
    #[serde(default)]
    pub state: Option<Named>,
    #[serde(default)]
    pub is_online: bool,
}

/// Establishment as embedded in a voucher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstablishmentRef {
    pub id: Uuid,
    pub fantasy_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Voucher {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub establishment: Option<EstablishmentRef>,
    #[serde(default)]
    pub status: Option<Named>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoucherRef {
    pub id: Uuid,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoucherCode {
    pub id: Uuid,
    pub code: String,
    #[serde(default)]
    pub was_redeemed: bool,
    #[serde(default)]
    pub redeemed_at: Option<String>,
    #[serde(default)]
    pub voucher: Option<VoucherRef>,
    #[serde(default)]
    pub member: Option<Named>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub cpf: String,
    #[serde(default)]
    pub email: Option<String>,
    pub role_id: i32,
    #[serde(default)]
    pub client: Option<ClientRef>,
}

// =============================================================================
// TABLE ROWS
// =============================================================================

/// A resource that can be shown as one row of a list table.
pub trait TableRow {
    const HEADERS: &'static [&'static str];

    /// Plain-text cells, in `HEADERS` order. Escaping happens at render time.
    fn cells(&self) -> Vec<String>;
}

fn name_or_dash(named: Option<&Named>) -> String {
    named.map_or_else(|| "-".to_owned(), |n| n.name.clone())
}

fn yes_no(flag: bool) -> String {
    let label = if flag { "Sim" } else { "Não" };
    label.to_owned()
}

impl TableRow for Member {
    const HEADERS: &'static [&'static str] = &["Nome", "CPF", "E-mail", "Cliente", "Status"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            crate::services::cpf::format(&self.cpf).unwrap_or_else(|| self.cpf.clone()),
            self.email.clone().unwrap_or_else(|| "-".into()),
            self.client
                .as_ref()
                .map_or_else(|| "-".to_owned(), |c| c.fantasy_name.clone()),
            name_or_dash(self.status.as_ref()),
        ]
    }
}

impl TableRow for Client {
    const HEADERS: &'static [&'static str] = &["Nome fantasia", "Razão social", "CNPJ", "Status"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.fantasy_name.clone(),
            self.corporate_name.clone().unwrap_or_else(|| "-".into()),
            self.cnpj.clone(),
            name_or_dash(self.status.as_ref()),
        ]
    }
}

impl TableRow for Establishment {
    const HEADERS: &'static [&'static str] = &["Nome fantasia", "Categoria", "Cidade", "Estado", "Online"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.fantasy_name.clone(),
            name_or_dash(self.category.as_ref()),
            name_or_dash(self.city.as_ref()),
            name_or_dash(self.state.as_ref()),
            yes_no(self.is_online),
        ]
    }
}

impl TableRow for Voucher {
    const HEADERS: &'static [&'static str] = &["Título", "Estabelecimento", "Status"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.title.clone(),
            self.establishment
                .as_ref()
                .map_or_else(|| "-".to_owned(), |e| e.fantasy_name.clone()),
            name_or_dash(self.status.as_ref()),
        ]
    }
}

impl TableRow for VoucherCode {
    const HEADERS: &'static [&'static str] = &["Código", "Voucher", "Membro", "Resgatado"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.code.clone(),
            self.voucher
                .as_ref()
                .map_or_else(|| "-".to_owned(), |v| v.title.clone()),
            name_or_dash(self.member.as_ref()),
            yes_no(self.was_redeemed),
        ]
    }
}

impl TableRow for User {
    const HEADERS: &'static [&'static str] = &["Nome", "CPF", "E-mail", "Cliente"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            crate::services::cpf::format(&self.cpf).unwrap_or_else(|| self.cpf.clone()),
            self.email.clone().unwrap_or_else(|| "-".into()),
            self.client
                .as_ref()
                .map_or_else(|| "-".to_owned(), |c| c.fantasy_name.clone()),
        ]
    }
}

// =============================================================================
// RESOURCE KINDS
// =============================================================================

/// The list screens of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Members,
    Clients,
    Establishments,
    Vouchers,
    VoucherCodes,
    Users,
}

impl ResourceKind {
    pub const ALL: [Self; 6] =
        [Self::Members, Self::Clients, Self::Establishments, Self::Vouchers, Self::VoucherCodes, Self::Users];

    /// URL segment under `/painel`.
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Self::Members => "membros",
            Self::Clients => "clientes",
            Self::Establishments => "estabelecimentos",
            Self::Vouchers => "vouchers",
            Self::VoucherCodes => "codigos",
            Self::Users => "usuarios",
        }
    }

    #[must_use]
    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.slug() == slug)
    }

    /// Backend list endpoint, relative to the API root.
    #[must_use]
    pub fn endpoint(self) -> &'static str {
        match self {
            Self::Members => "/members",
            Self::Clients => "/clients",
            Self::Establishments => "/establishments",
            Self::Vouchers => "/vouchers",
            Self::VoucherCodes => "/voucher-codes",
            Self::Users => "/users",
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Members => "Membros",
            Self::Clients => "Clientes",
            Self::Establishments => "Estabelecimentos",
            Self::Vouchers => "Vouchers",
            Self::VoucherCodes => "Códigos de voucher",
            Self::Users => "Usuários",
        }
    }

    /// Filters the backend accepts for this list.
    #[must_use]
    pub fn filters(self) -> &'static [Filter] {
        match self {
            Self::Members => &[Filter::SearchInput, Filter::StatusId, Filter::ClientId],
            Self::Clients => &[Filter::SearchInput, Filter::StatusId],
            Self::Establishments => {
                &[Filter::SearchInput, Filter::StateId, Filter::CityId, Filter::CategoryId, Filter::IsOnline]
            }
            Self::Vouchers => &[Filter::SearchInput, Filter::StatusId, Filter::CategoryId],
            Self::VoucherCodes => &[Filter::SearchInput, Filter::WasRedeemed, Filter::ClientId],
            Self::Users => &[Filter::SearchInput, Filter::ClientId],
        }
    }

    /// Users tied to a client company do not manage system users.
    #[must_use]
    pub fn visible_to(self, user: &crate::session::LoggedUser) -> bool {
        self != Self::Users || user.client.is_none()
    }
}

#[cfg(test)]
#[path = "models_test.rs"]
mod tests;
