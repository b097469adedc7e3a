use labparse_core::is_core_field;

use super::DataSource;

#[derive(Debug, Clone)]
pub struct FieldsInput {
    pub source: DataSource,
}

/// Strategy for listing schema fields with the surface forms searched for
/// each, longest first.
#[derive(Debug, Clone, Copy)]
pub struct FieldsStrategy;

impl super::CommandStrategy for FieldsStrategy {
    type Input = FieldsInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let (parser, data) = super::build_parser(&input.source)?;
        let scanned: Vec<&str> = parser.fields().collect();

        println!("=== Extended schema ({} fields) ===\n", data.schema().len());

        for field in data.schema().iter() {
            let marker = if scanned.contains(&field) {
                ""
            } else if is_core_field(field) {
                "  (core field, skipped)"
            } else {
                "  (skipped)"
            };
            println!("{field}{marker}");
            for alias in data.field_aliases().aliases_for(field) {
                println!("    {alias}");
            }
        }

        if data.schema.is_defaulted() {
            println!("\n(schema file not loaded; using an empty schema)");
        }

        Ok(())
    }
}
