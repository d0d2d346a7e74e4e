//! Application router configuration.

use axum::{
    Router,
    response::Redirect,
    routing::{delete, get, post},
};

use crate::{
    AppState, endpoints,
    expense::{
        create_expense_endpoint, delete_all_expenses_endpoint, delete_expense_endpoint,
        export_csv_endpoint, get_expenses_page,
    },
    internal_server_error::get_internal_server_error_page,
    not_found::get_404_not_found,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::DESPESAS_VIEW, get(get_expenses_page))
        .route(
            endpoints::DESPESAS_API,
            post(create_expense_endpoint).delete(delete_all_expenses_endpoint),
        )
        .route(endpoints::DELETE_DESPESA, delete(delete_expense_endpoint))
        .route(endpoints::EXPORT_CSV, get(export_csv_endpoint))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        )
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the expenses page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::DESPESAS_VIEW)
}

#[cfg(test)]
mod root_route_tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use crate::{endpoints, routing::get_index_page};

    #[tokio::test]
    async fn root_redirects_to_expenses_page() {
        let response = get_index_page().await.into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let location = response.headers().get("location").unwrap();
        assert_eq!(location, endpoints::DESPESAS_VIEW);
    }
}

#[cfg(test)]
mod router_tests {
    use axum::http::{StatusCode, header};
    use axum_htmx::HX_REDIRECT;
    use axum_test::TestServer;
    use rusqlite::Connection;

    use crate::{AppState, endpoints};

    use super::build_router;

    fn new_test_server() -> TestServer {
        let conn = Connection::open_in_memory().unwrap();
        let state = AppState::new(conn).unwrap();

        TestServer::new(build_router(state))
    }

    async fn add_expense(server: &TestServer, descricao: &str, valor: &str, categoria: &str) {
        let form = [
            ("descricao", descricao),
            ("valor", valor),
            ("categoria", categoria),
            ("data", "2024-01-10"),
        ];

        let response = server.post(endpoints::DESPESAS_API).form(&form).await;

        response.assert_status(StatusCode::SEE_OTHER);
        let location = response.headers().get(HX_REDIRECT).unwrap();
        assert_eq!(location, "/despesas?sucesso=despesa-adicionada");
    }

    #[tokio::test]
    async fn add_then_delete_round_trip() {
        let server = new_test_server();

        add_expense(&server, "Almoço", "15.5", "Alimentação").await;

        let page = server.get(endpoints::DESPESAS_VIEW).await;
        page.assert_status_ok();
        let page_text = page.text();
        assert!(page_text.contains("Almoço"));
        assert!(page_text.contains("10/01/2024"));

        let response = server.delete("/api/despesas/1").await;
        response.assert_status(StatusCode::SEE_OTHER);

        let page = server.get(endpoints::DESPESAS_VIEW).await;
        assert!(page.text().contains("Nenhuma despesa cadastrada ainda."));
    }

    #[tokio::test]
    async fn delete_all_clears_every_record() {
        let server = new_test_server();
        add_expense(&server, "Almoço", "15.5", "Alimentação").await;
        add_expense(&server, "Ônibus", "3.0", "Transporte").await;

        let response = server.delete(endpoints::DESPESAS_API).await;

        response.assert_status(StatusCode::SEE_OTHER);
        let location = response.headers().get(HX_REDIRECT).unwrap();
        assert_eq!(location, "/despesas?sucesso=historico-apagado");

        let page = server.get(endpoints::DESPESAS_VIEW).await;
        assert!(page.text().contains("Nenhuma despesa cadastrada ainda."));
    }

    #[tokio::test]
    async fn csv_export_downloads_every_record() {
        let server = new_test_server();
        add_expense(&server, "Almoço", "15.5", "Alimentação").await;
        add_expense(&server, "Ônibus", "3.0", "Transporte").await;

        let response = server.get(endpoints::EXPORT_CSV).await;

        response.assert_status_ok();
        let content_type = response.headers().get(header::CONTENT_TYPE).unwrap();
        assert_eq!(content_type, "text/csv; charset=utf-8");
        let content_disposition = response.headers().get(header::CONTENT_DISPOSITION).unwrap();
        assert_eq!(
            content_disposition,
            "attachment; filename=\"despesas.csv\""
        );

        let text = response.text();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Descrição,Valor,Categoria,Data");
        assert_eq!(lines[1], "Almoço,15.5,Alimentação,10/01/2024");
        assert_eq!(lines[2], "Ônibus,3,Transporte,10/01/2024");
    }

    #[tokio::test]
    async fn unknown_route_returns_404_page() {
        let server = new_test_server();

        let response = server.get("/nada").await;

        response.assert_status(StatusCode::NOT_FOUND);
    }
}
