use crate::error::TransformError;
use crate::parse::schema::SchemaOrRef;
use crate::parse::spec::SwaggerSpec;
use crate::view::TypeRecord;

use super::name_normalizer::to_safe_type_name;
use super::type_converter::convert_definition;

/// Turn one entry of `definitions` into an exported type.
pub fn build(
    name: &str,
    schema: &SchemaOrRef,
    spec: &SwaggerSpec,
) -> Result<TypeRecord, TransformError> {
    let type_expr = convert_definition(name, schema, spec)?;
    Ok(TypeRecord {
        name: to_safe_type_name(name),
        description: schema.description().map(str::to_string),
        type_expr,
    })
}
