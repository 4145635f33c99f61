use journal_common::analysis::{AnalysisError, Analyzer};
use journal_common::request_io::{
    InputEntry, InputEntryUpdate, OutputDetail, OutputEntryCreated, OutputEntryList,
};
use journal_common::service::EntryService;
use journal_common::validators::{self, Validity};

use actix_web::{web, HttpResponse};

use crate::handlers::error::HttpErrorResponse;

const ENTRY_NOT_FOUND_MSG: &str = "Entry not found";

pub async fn create(
    entry_service: web::Data<EntryService>,
    entry_data: web::Json<InputEntry>,
) -> Result<HttpResponse, HttpErrorResponse> {
    if let Validity::Invalid(msg) = validators::validate_new_entry(&entry_data) {
        return Err(HttpErrorResponse::InputTooLong(msg));
    }

    let entry = entry_service
        .create_entry(entry_data.into_inner().into())
        .await
        .map_err(|e| HttpErrorResponse::from_dao_error(e, "create entry"))?;

    Ok(HttpResponse::Ok().json(OutputEntryCreated {
        detail: String::from("Entry created successfully"),
        entry,
    }))
}

pub async fn get_all(
    entry_service: web::Data<EntryService>,
) -> Result<HttpResponse, HttpErrorResponse> {
    let entries = entry_service
        .get_all_entries()
        .await
        .map_err(|e| HttpErrorResponse::from_dao_error(e, "get entries"))?;

    Ok(HttpResponse::Ok().json(OutputEntryList::from(entries)))
}

pub async fn get(
    entry_service: web::Data<EntryService>,
    entry_id: web::Path<String>,
) -> Result<HttpResponse, HttpErrorResponse> {
    let entry = match entry_service.get_entry(&entry_id).await {
        Ok(Some(e)) => e,
        Ok(None) => {
            return Err(HttpErrorResponse::DoesNotExist(String::from(
                ENTRY_NOT_FOUND_MSG,
            )));
        }
        Err(e) => return Err(HttpErrorResponse::from_dao_error(e, "get entry")),
    };

    Ok(HttpResponse::Ok().json(entry))
}

pub async fn edit(
    entry_service: web::Data<EntryService>,
    entry_id: web::Path<String>,
    entry_update: web::Json<InputEntryUpdate>,
) -> Result<HttpResponse, HttpErrorResponse> {
    if let Validity::Invalid(msg) = validators::validate_entry_update(&entry_update) {
        return Err(HttpErrorResponse::InputTooLong(msg));
    }

    let update = entry_update.into_inner().into();
    let updated_entry = match entry_service.update_entry(&entry_id, &update).await {
        Ok(Some(e)) => e,
        Ok(None) => {
            return Err(HttpErrorResponse::DoesNotExist(String::from(
                ENTRY_NOT_FOUND_MSG,
            )));
        }
        Err(e) => return Err(HttpErrorResponse::from_dao_error(e, "update entry")),
    };

    Ok(HttpResponse::Ok().json(updated_entry))
}

pub async fn delete(
    entry_service: web::Data<EntryService>,
    entry_id: web::Path<String>,
) -> Result<HttpResponse, HttpErrorResponse> {
    let was_deleted = entry_service
        .delete_entry(&entry_id)
        .await
        .map_err(|e| HttpErrorResponse::from_dao_error(e, "delete entry"))?;

    if !was_deleted {
        return Err(HttpErrorResponse::DoesNotExist(String::from(
            ENTRY_NOT_FOUND_MSG,
        )));
    }

    Ok(HttpResponse::Ok().json(OutputDetail::new("Entry deleted successfully")))
}

pub async fn delete_all(
    entry_service: web::Data<EntryService>,
) -> Result<HttpResponse, HttpErrorResponse> {
    entry_service
        .delete_all_entries()
        .await
        .map_err(|e| HttpErrorResponse::from_dao_error(e, "delete entries"))?;

    Ok(HttpResponse::Ok().json(OutputDetail::new("All entries deleted")))
}

pub async fn analyze(
    entry_service: web::Data<EntryService>,
    analyzer: web::Data<Analyzer>,
    entry_id: web::Path<String>,
) -> Result<HttpResponse, HttpErrorResponse> {
    let entry = match entry_service.get_entry(&entry_id).await {
        Ok(Some(e)) => e,
        Ok(None) => {
            return Err(HttpErrorResponse::DoesNotExist(String::from(
                ENTRY_NOT_FOUND_MSG,
            )));
        }
        Err(e) => return Err(HttpErrorResponse::from_dao_error(e, "get entry")),
    };

    let analysis = match analyzer.analyze(&entry).await {
        Ok(a) => a,
        Err(AnalysisError::NotImplemented) => {
            return Err(HttpErrorResponse::NotImplemented(String::from(
                "Entry analysis is not implemented yet",
            )));
        }
        Err(e) => {
            log::error!("{e}");
            return Err(HttpErrorResponse::InternalError(String::from(
                "Failed to analyze entry",
            )));
        }
    };

    Ok(HttpResponse::Ok().json(analysis))
}
