use super::{FieldSpec, ResourceModel, WriteKind};

/// Customers: six mandatory text columns.
pub struct CustomerModel;

const CUSTOMER_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("name"),
    FieldSpec::text("email"),
    FieldSpec::text("phone"),
    FieldSpec::text("address"),
    FieldSpec::text("city"),
    FieldSpec::text("uf"),
];

impl ResourceModel for CustomerModel {
    fn table_name(&self) -> &str {
        "customer"
    }

    fn fields(&self) -> &[FieldSpec] {
        CUSTOMER_FIELDS
    }

    fn label(&self) -> &str {
        "Cliente"
    }

    fn plural_label(&self) -> &str {
        "clientes"
    }
}

/// Products: two text columns and two numeric ones.
pub struct ProductModel;

const PRODUCT_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("name"),
    FieldSpec::text("brand"),
    FieldSpec::numeric("price"),
    FieldSpec::numeric("weight"),
];

impl ResourceModel for ProductModel {
    fn table_name(&self) -> &str {
        "product"
    }

    fn fields(&self) -> &[FieldSpec] {
        PRODUCT_FIELDS
    }

    fn label(&self) -> &str {
        "Produto"
    }

    fn plural_label(&self) -> &str {
        "produtos"
    }

    // Clients of the create endpoint expect the field list spelled out.
    fn missing_fields_message(&self, kind: WriteKind) -> String {
        match kind {
            WriteKind::Create => {
                let names: Vec<&str> = self.fields().iter().map(|f| f.name).collect();
                format!("Todos os campos são obrigatórios: {}", names.join(", "))
            }
            WriteKind::Update => "Todos os campos são obrigatórios".to_string(),
        }
    }
}
