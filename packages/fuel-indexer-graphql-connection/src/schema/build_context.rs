use super::connection_field::*;
use super::error::*;
use super::names::*;
use super::resolver::*;
use super::self_prelude::*;
use super::type_cache::*;
use parking_lot::Mutex;

/// Arguments a field condition may not take the name of.
const RESERVED_ARGUMENTS: [&str; 5] = ["orderBy", "before", "after", "first", "last"];

/// The memoized `<Name>Connection` type of a paginator.
#[derive(Debug)]
pub struct ConnectionType {
    name: String,
    node: TypeRef,
    edge: Arc<EdgeType>,
}

impl ConnectionType {
    pub fn type_name(&self) -> String {
        TypeRef::connection(&self.name)
    }
    pub fn node(&self) -> &TypeRef {
        &self.node
    }
    pub fn edge(&self) -> &Arc<EdgeType> {
        &self.edge
    }
}

/// The memoized `<Name>Edge` type of a paginator.
#[derive(Debug)]
pub struct EdgeType {
    name: String,
    node: TypeRef,
}

impl EdgeType {
    pub fn type_name(&self) -> String {
        TypeRef::connection_edge(&self.name)
    }
    pub fn node(&self) -> &TypeRef {
        &self.node
    }
}

/// The memoized `<Name>OrderBy` enum of a paginator with orderings.
#[derive(Debug)]
pub struct OrderByType {
    name: String,
    /// Enum item name to ordering, in declaration order.
    items: IndexMap<String, Ordering>,
    default_item: Option<String>,
}

impl OrderByType {
    pub fn type_name(&self) -> String {
        TypeRef::order_by(&self.name)
    }
    pub fn items(&self) -> impl Iterator<Item = (&str, &Ordering)> {
        self.items.iter().map(|(item, ordering)| (item.as_str(), ordering))
    }
    pub fn ordering(&self, item: &str) -> Option<&Ordering> {
        self.items.get(item)
    }
    pub fn default_item(&self) -> Option<&str> {
        self.default_item.as_deref()
    }
}

#[derive(Default)]
struct TypeRegistry {
    names: HashSet<String>,
    types: Vec<DynType>,
}

/// The scope of one schema build. Generated types are memoized per
/// paginator for as long as the context lives, and every dynamic type the
/// build needs is collected here until [`BuildContext::into_types`].
pub struct BuildContext {
    id: BuildId,
    config: ConnectionConfig,
    connections: TypeCache<ConnectionType>,
    edges: TypeCache<EdgeType>,
    order_bys: TypeCache<OrderByType>,
    registry: Mutex<TypeRegistry>,
}

impl BuildContext {
    pub fn new(config: ConnectionConfig) -> Self {
        let mut registry = TypeRegistry::default();
        registry.names.insert(TypeRef::PAGE_INFO.to_string());
        registry
            .types
            .push(Object::new_page_info::<PaginatedResolver>().into());
        registry.names.insert(TypeRef::CURSOR.to_string());
        registry.types.push(Scalar::new_cursor().into());

        Self {
            id: BuildId::next(),
            config,
            connections: TypeCache::default(),
            edges: TypeCache::default(),
            order_bys: TypeCache::default(),
            registry: Mutex::new(registry),
        }
    }

    pub fn id(&self) -> BuildId {
        self.id
    }

    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    fn key(&self, paginator: &PaginatorHandle) -> TypeKey {
        TypeKey {
            build: self.id,
            paginator: paginator.id(),
        }
    }

    /// Registers a type whose name must not be taken yet.
    pub fn register_unique(
        &self,
        name: impl Into<String>,
        ty: impl Into<DynType>,
    ) -> BuildResult<()> {
        let name = name.into();
        let mut registry = self.registry.lock();
        if !registry.names.insert(name.clone()) {
            return Err(BuildError::DuplicateTypeName(name));
        }
        registry.types.push(ty.into());
        Ok(())
    }

    /// Registers a type unless one of the same name exists. The name is
    /// claimed before `construct` runs, which may register further types.
    pub fn register_if_absent(
        &self,
        name: &str,
        construct: impl FnOnce() -> BuildResult<DynType>,
    ) -> BuildResult<()> {
        if !self.registry.lock().names.insert(name.to_string()) {
            return Ok(());
        }
        let ty = construct()?;
        self.registry.lock().types.push(ty);
        Ok(())
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.registry.lock().names.contains(name)
    }

    pub fn edge_type(&self, paginator: &PaginatorHandle) -> BuildResult<Arc<EdgeType>> {
        let (edge, inserted) =
            self.edges
                .get_or_try_insert_with(self.key(paginator), || -> BuildResult<_> {
                    Ok(EdgeType {
                        name: type_name(paginator.name()),
                        node: self.output_type(paginator.r#type())?,
                    })
                })?;
        if inserted {
            self.register_unique(
                edge.type_name(),
                Object::new_connection_edge::<PaginatedResolver>(
                    &edge.name,
                    edge.node.clone(),
                ),
            )?;
        }
        Ok(edge)
    }

    pub fn connection_type(
        &self,
        paginator: &PaginatorHandle,
    ) -> BuildResult<Arc<ConnectionType>> {
        let (connection, inserted) = self.connections.get_or_try_insert_with(
            self.key(paginator),
            || -> BuildResult<_> {
                Ok(ConnectionType {
                    name: type_name(paginator.name()),
                    node: self.output_type(paginator.r#type())?,
                    edge: self.edge_type(paginator)?,
                })
            },
        )?;
        if inserted {
            self.register_unique(
                connection.type_name(),
                Object::new_connection::<PaginatedResolver>(
                    &connection.name,
                    connection.node.clone(),
                ),
            )?;
        }
        Ok(connection)
    }

    /// `None` when the paginator declares no orderings.
    pub fn order_by_type(
        &self,
        paginator: &PaginatorHandle,
    ) -> BuildResult<Option<Arc<OrderByType>>> {
        if paginator.orderings().is_empty() {
            return Ok(None);
        }
        let (order_by, inserted) =
            self.order_bys
                .get_or_try_insert_with(self.key(paginator), || -> BuildResult<_> {
                    let mut items = IndexMap::new();
                    for ordering in paginator.orderings() {
                        let item = enum_item_name(ordering.name());
                        if items.insert(item.clone(), ordering.clone()).is_some() {
                            return Err(BuildError::DuplicateEnumItem {
                                type_name: TypeRef::order_by(type_name(paginator.name())),
                                item,
                            });
                        }
                    }
                    let default_item = paginator
                        .default_ordering()
                        .map(|default| {
                            items
                                .iter()
                                .find(|(_, ordering)| *ordering == default)
                                .map(|(item, _)| item.clone())
                                .ok_or_else(|| BuildError::UnknownDefaultOrdering {
                                    paginator: paginator.name().to_string(),
                                    ordering: default.name().to_string(),
                                })
                        })
                        .transpose()?;
                    Ok(OrderByType {
                        name: type_name(paginator.name()),
                        items,
                        default_item,
                    })
                })?;
        if inserted {
            self.register_unique(
                order_by.type_name(),
                Enum::new_order_by(&order_by.name, order_by.items.keys().cloned()),
            )?;
        }
        Ok(Some(order_by))
    }

    /// One nullable equality argument per field of the paginator's object
    /// type.
    fn field_conditions(
        &self,
        paginator: &PaginatorHandle,
    ) -> BuildResult<Vec<FieldCondition>> {
        let ty = paginator.r#type();
        let object = match ty.named_type().map(NamedType::kind) {
            Ok(NamedKind::Object(object)) => object,
            _ => {
                return Err(BuildError::FieldsConditionOnNonObject {
                    paginator: paginator.name().to_string(),
                    type_name: ty.to_string(),
                })
            }
        };
        object
            .fields()
            .map(|field| {
                let argument = field_name(field.name());
                if RESERVED_ARGUMENTS.contains(&argument.as_str()) {
                    return Err(BuildError::ReservedArgument {
                        paginator: paginator.name().to_string(),
                        argument,
                    });
                }
                let input = match self.input_type(field.r#type())? {
                    TypeRef::NonNull(inner) => *inner,
                    input => input,
                };
                Ok(FieldCondition {
                    argument,
                    field: field.name().to_string(),
                    r#type: field.r#type().clone(),
                    input,
                })
            })
            .collect()
    }

    /// Builds a connection field over `paginator`. Calling this twice for
    /// the same handle reuses the generated types.
    pub fn connection_field(
        &self,
        name: impl Into<String>,
        paginator: &PaginatorHandle,
        config: ConnectionFieldConfig,
    ) -> BuildResult<Field> {
        let connection = self.connection_type(paginator)?;
        let order_by = self.order_by_type(paginator)?;
        let field_conditions = if config.with_fields_condition {
            self.field_conditions(paginator)?
        } else {
            Vec::new()
        };

        let resolver = Arc::new(ConnectionFieldResolver {
            paginator: paginator.clone(),
            order_by: order_by.clone(),
            field_conditions: field_conditions.clone(),
            get_condition: config.get_condition,
            malformed_cursor: self.config.malformed_cursor,
            max_page_size: self.config.max_page_size,
        });

        let mut field = Field::new(
            name,
            TypeRef::named_nn(connection.type_name()),
            move |ctx| {
                let resolver = resolver.clone();
                FieldFuture::new(async move {
                    let connection = resolver.resolve(&ctx).await?;
                    Ok(Some(FieldValue::owned_any(connection)))
                })
            },
        );
        if let Some(order_by) = &order_by {
            field = field.order_by_argument(
                order_by.type_name(),
                order_by.default_item().map(str::to_string),
            );
        }
        field = field.connection_arguments();
        for condition in field_conditions {
            field = field.argument(InputValue::new(condition.argument, condition.input));
        }
        Ok(field)
    }

    /// Every dynamic type registered during the build.
    pub fn into_types(self) -> Vec<DynType> {
        self.registry.into_inner().types
    }
}
