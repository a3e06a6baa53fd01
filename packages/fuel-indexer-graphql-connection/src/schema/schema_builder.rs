use super::build_context::*;
use super::connection_field::*;
use super::error::*;
use super::self_prelude::*;

/// Assembles a schema whose root query exposes connection fields.
pub struct ConnectionSchemaBuilder {
    context: BuildContext,
    query: Object,
}

impl Default for ConnectionSchemaBuilder {
    fn default() -> Self {
        Self::new(ConnectionConfig::default())
    }
}

impl ConnectionSchemaBuilder {
    pub fn new(config: ConnectionConfig) -> Self {
        let query = Object::new(&config.query_type_name);
        Self {
            context: BuildContext::new(config),
            query,
        }
    }

    /// The build context, for connection fields placed on types other than
    /// the root query.
    pub fn context(&self) -> &BuildContext {
        &self.context
    }

    /// Adds a connection over `paginator` to the root query.
    pub fn connection(
        mut self,
        field_name: impl Into<String>,
        paginator: &PaginatorHandle,
        config: ConnectionFieldConfig,
    ) -> BuildResult<Self> {
        let field = self.context.connection_field(field_name, paginator, config)?;
        self.query = self.query.field(field);
        Ok(self)
    }

    /// Adds any other field to the root query.
    pub fn field(mut self, field: Field) -> Self {
        self.query = self.query.field(field);
        self
    }

    /// Registers a type that is not generated by the build.
    pub fn register(self, name: impl Into<String>, ty: impl Into<DynType>) -> BuildResult<Self> {
        self.context.register_unique(name, ty)?;
        Ok(self)
    }

    pub fn finish(self) -> BuildResult<Schema> {
        let Self { context, query } = self;
        let query_type_name = context.config().query_type_name.clone();
        let build = context.id();

        let types = context.into_types();
        let type_count = types.len();
        let schema = types
            .into_iter()
            .fold(Schema::build(&query_type_name, None, None), |schema, ty| {
                schema.register(ty)
            })
            .register(query)
            .finish()
            .map_err(|e| BuildError::Schema(e.to_string()))?;

        info!("Schema build {build:?} finished with {type_count} generated types");
        Ok(schema)
    }
}
