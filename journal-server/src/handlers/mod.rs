pub mod entry;
pub mod health;

pub mod error {
    use journal_common::db::DaoError;
    use journal_common::request_io::ServerErrorResponse;

    use actix_web::http::StatusCode;
    use actix_web::{HttpResponse, HttpResponseBuilder};
    use std::fmt;

    #[derive(Debug)]
    pub enum HttpErrorResponse {
        // 404
        DoesNotExist(String),

        // 409
        ConflictWithExisting(String),

        // 422
        IncorrectlyFormed(String),
        InputTooLong(String),

        // 500
        InternalError(String),

        // 501
        NotImplemented(String),
    }

    impl std::error::Error for HttpErrorResponse {}

    impl fmt::Display for HttpErrorResponse {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            let server_error: ServerErrorResponse = self.into();
            write!(f, "{:?}", server_error)
        }
    }

    impl From<HttpErrorResponse> for ServerErrorResponse {
        fn from(resp: HttpErrorResponse) -> Self {
            (&resp).into()
        }
    }

    impl From<&HttpErrorResponse> for ServerErrorResponse {
        fn from(resp: &HttpErrorResponse) -> Self {
            match resp {
                // 404
                HttpErrorResponse::DoesNotExist(msg) => ServerErrorResponse {
                    err_type: String::from("DoesNotExist"),
                    detail: msg.clone(),
                },

                // 409
                HttpErrorResponse::ConflictWithExisting(msg) => ServerErrorResponse {
                    err_type: String::from("ConflictWithExisting"),
                    detail: format!("Conflict with existing data: {msg}"),
                },

                // 422
                HttpErrorResponse::IncorrectlyFormed(msg) => ServerErrorResponse {
                    err_type: String::from("IncorrectlyFormed"),
                    detail: format!("Incorrectly formed request: {msg}"),
                },
                HttpErrorResponse::InputTooLong(msg) => ServerErrorResponse {
                    err_type: String::from("InputTooLong"),
                    detail: format!("Input is too long: {msg}"),
                },

                // 500
                HttpErrorResponse::InternalError(msg) => ServerErrorResponse {
                    err_type: String::from("InternalError"),
                    detail: format!("Internal error: {msg}"),
                },

                // 501
                HttpErrorResponse::NotImplemented(msg) => ServerErrorResponse {
                    err_type: String::from("NotImplemented"),
                    detail: msg.clone(),
                },
            }
        }
    }

    impl actix_web::error::ResponseError for HttpErrorResponse {
        fn error_response(&self) -> HttpResponse {
            HttpResponseBuilder::new(self.status_code()).json(ServerErrorResponse::from(self))
        }

        fn status_code(&self) -> StatusCode {
            match *self {
                HttpErrorResponse::DoesNotExist(_) => StatusCode::NOT_FOUND,
                HttpErrorResponse::ConflictWithExisting(_) => StatusCode::CONFLICT,
                HttpErrorResponse::IncorrectlyFormed(_) | HttpErrorResponse::InputTooLong(_) => {
                    StatusCode::UNPROCESSABLE_ENTITY
                }
                HttpErrorResponse::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
                HttpErrorResponse::NotImplemented(_) => StatusCode::NOT_IMPLEMENTED,
            }
        }
    }

    impl HttpErrorResponse {
        /// Logs the underlying failure and hides it from the client, except for constraint
        /// violations which the client can act on.
        pub fn from_dao_error(error: DaoError, action: &str) -> Self {
            match error {
                DaoError::ConstraintViolation(msg) => HttpErrorResponse::ConflictWithExisting(msg),
                e => {
                    log::error!("{e}");
                    HttpErrorResponse::InternalError(format!("Failed to {action}"))
                }
            }
        }
    }

    impl From<actix_web::error::JsonPayloadError> for HttpErrorResponse {
        fn from(err: actix_web::error::JsonPayloadError) -> Self {
            HttpErrorResponse::IncorrectlyFormed(err.to_string())
        }
    }

}
