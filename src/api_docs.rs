use utoipa::OpenApi;
use crate::controllers::pv_controller;
use crate::models::pv;
use crate::error;

#[derive(OpenApi)]
#[openapi(
    paths(
        pv_controller::read_root,
        pv_controller::calculate_pv
    ),
    components(
        schemas(
            pv::PvRequest,
            pv::PvResponse,
            pv::RootMessage,
            error::ApiError
        )
    ),
    tags(
        (name = "pv-calculator", description = "PV yield and payback estimation API")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_endpoints() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/"));
        assert!(doc.paths.paths.contains_key("/calculate"));

        let schemas = doc.components.unwrap().schemas;
        assert!(schemas.contains_key("PvRequest"));
        assert!(schemas.contains_key("PvResponse"));
    }
}
