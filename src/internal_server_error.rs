//! The 500 page shown when an unexpected error stops a request.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::html::error_view;

/// The description and suggested fix shown on the 500 page.
pub(crate) struct InternalServerErrorPage<'a> {
    pub description: &'a str,
    pub fix: &'a str,
}

impl Default for InternalServerErrorPage<'_> {
    fn default() -> Self {
        Self {
            description: "Desculpe, algo deu errado.",
            fix: "Tente novamente mais tarde ou verifique os logs do servidor",
        }
    }
}

/// A route handler that renders the 500 page.
pub(crate) async fn get_internal_server_error_page() -> Response {
    render_internal_server_error(Default::default())
}

pub(crate) fn render_internal_server_error(page: InternalServerErrorPage) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        error_view("Erro interno", "500", page.description, page.fix),
    )
        .into_response()
}
