use super::error::*;
use super::self_prelude::*;

type Error = ConnectionError;
type Result<T> = ConnectionResult<T>;

#[extension_trait]
pub impl<'a> ConnectionResolverContext<'a> for ResolverContext<'a> {
    fn request_context(&self) -> Result<&RequestContext> {
        self.data_opt::<RequestContext>()
            .ok_or(Error::MissingRequestContext)
    }
    fn parent<T: 'static>(&self) -> Result<&T> {
        self.parent_value
            .try_downcast_ref::<T>()
            .map_err(|_| Error::Parent(std::any::type_name::<T>()))
    }

    // Argument getter methods. An explicit `null` counts as absent.
    fn get_arg(&self, name: &str) -> Option<ValueAccessor> {
        self.args.get(name).filter(|arg| !arg.is_null())
    }
    fn get_arg_i64(&self, name: &str) -> Result<Option<i64>> {
        self.get_arg(name)
            .map(|arg| arg.i64().map_err(|_e| Error::Argument(name.into())))
            .transpose()
    }
    fn get_arg_string(&self, name: &str) -> Result<Option<&str>> {
        self.get_arg(name)
            .map(|arg| arg.string().map_err(|_e| Error::Argument(name.into())))
            .transpose()
    }
}
