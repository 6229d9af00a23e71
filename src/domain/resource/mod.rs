//! Resource definitions: which table a resource lives in and which fields it carries.

pub mod catalog;
pub mod command;
pub mod registry;

pub use catalog::{CustomerModel, ProductModel};
pub use command::{RecordCommand, ResourceId, ValidationError, WriteKind};
pub use registry::ResourceRegistry;

/// How a field's value is handed to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Bound as text.
    Text,
    /// Bound as text and cast to `numeric` inside the statement. Zero is a value, not an absence.
    Numeric,
}

/// One caller-supplied column. The order of a model's fields is the positional parameter order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub const fn text(name: &'static str) -> Self {
        Self { name, kind: FieldKind::Text }
    }

    pub const fn numeric(name: &'static str) -> Self {
        Self { name, kind: FieldKind::Numeric }
    }
}

/// Contract for any resource exposed through the generic CRUD handlers.
///
/// Implementations only describe data; statement building and response mapping are shared.
/// Every field returned by `fields` is required on both create and update, and the
/// primary key is always assigned by the store.
pub trait ResourceModel: Send + Sync {
    /// Table name, also used as the route prefix (`/{table}`).
    fn table_name(&self) -> &str;

    /// Caller-supplied columns, in positional-parameter order.
    fn fields(&self) -> &[FieldSpec];

    /// Display name of a single record, e.g. `Cliente`.
    fn label(&self) -> &str;

    /// Display name of the collection, e.g. `clientes`.
    fn plural_label(&self) -> &str;

    fn primary_key_field(&self) -> &str {
        "id"
    }

    /// Message returned when a required field is absent.
    fn missing_fields_message(&self, _kind: WriteKind) -> String {
        "Todos os campos são obrigatórios".to_string()
    }

    fn missing_id_message(&self) -> String {
        "O id precisa ser informado".to_string()
    }

    fn not_found_message(&self) -> String {
        format!("{} não encontrado.", self.label())
    }

    fn deleted_message(&self, id: &ResourceId) -> String {
        format!("{} com ID {} excluído com sucesso", self.label(), id)
    }

    fn list_failed_message(&self) -> String {
        format!("Erro ao buscar {}", self.plural_label())
    }

    fn create_failed_message(&self) -> String {
        format!("Erro ao criar {}", self.label().to_lowercase())
    }

    fn update_failed_message(&self) -> String {
        format!("Erro ao atualizar {}", self.label().to_lowercase())
    }

    fn delete_failed_message(&self) -> String {
        format!("Erro ao excluir {}", self.label().to_lowercase())
    }
}
