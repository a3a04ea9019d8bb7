use arrow::datatypes::{DataType, Field, FieldRef, Schema, SchemaRef};
use std::collections::HashMap;
use std::sync::Arc;


struct NewSchema {
    fields: Vec<FieldRef>,
    metadata: HashMap<String, String>
}


/// Copy-on-write editor of a schema.
///
/// The original schema is returned as is when no field was changed.
pub struct SchemaPatch {
    original: SchemaRef,
    new_schema: Option<NewSchema>
}


impl SchemaPatch {
    pub fn new(schema: SchemaRef) -> Self {
        Self {
            original: schema,
            new_schema: None
        }
    }

    pub fn set_field_type(&mut self, index: usize, ty: DataType, nullable: bool) {
        let field = self.original.field(index);
        if field.data_type() == &ty && field.is_nullable() == nullable {
            return;
        }
        let new_field = Field::new(field.name(), ty, nullable)
            .with_metadata(field.metadata().clone());
        self.set_field(index, Arc::new(new_field))
    }

    pub fn set_field(&mut self, index: usize, field: FieldRef) {
        let new_schema = self.new_schema_mut();
        new_schema.fields[index] = field
    }

    fn new_schema_mut(&mut self) -> &mut NewSchema {
        let original = &self.original;
        self.new_schema.get_or_insert_with(|| NewSchema {
            fields: original.fields().to_vec(),
            metadata: original.metadata().clone()
        })
    }

    pub fn finish(self) -> SchemaRef {
        self.new_schema.map(|new_schema| {
            let schema = Schema::new_with_metadata(
                new_schema.fields,
                new_schema.metadata
            );
            Arc::new(schema)
        }).unwrap_or(self.original)
    }
}
