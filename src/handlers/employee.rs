use actix_web::error::JsonPayloadError;
use actix_web::{web, HttpRequest, HttpResponse};
use mongodb::bson::oid::ObjectId;

use crate::db::EmployeeStore;
use crate::errors::AppError;
use crate::models::employee::{Employee, EmployeeDocument};

/// Registers the `/employee` routes.
///
/// A malformed body is a 422 on create but a 400 on update, so each resource
/// carries its own JSON error handler. Paths match with or without a
/// trailing slash.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource(["/employee", "/employee/"])
            .app_data(web::JsonConfig::default().error_handler(unprocessable_payload))
            .route(web::get().to(list_employees))
            .route(web::post().to(create_employee)),
    )
    .service(
        web::resource(["/employee/{id}", "/employee/{id}/"])
            .app_data(web::JsonConfig::default().error_handler(bad_request_payload))
            .route(web::put().to(update_employee))
            .route(web::delete().to(delete_employee)),
    );
}

fn unprocessable_payload(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::UnprocessableEntity(err.to_string()).into()
}

fn bad_request_payload(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(err.to_string()).into()
}

fn parse_id(id: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id).map_err(|err| AppError::BadRequest(format!("Invalid employee ID: {}", err)))
}

pub async fn list_employees(store: web::Data<dyn EmployeeStore>) -> Result<HttpResponse, AppError> {
    let employees: Vec<Employee> = store
        .list()
        .await?
        .into_iter()
        .map(Employee::from)
        .collect();

    Ok(HttpResponse::Ok().json(employees))
}

pub async fn create_employee(
    store: web::Data<dyn EmployeeStore>,
    new_employee: web::Json<Employee>,
) -> Result<HttpResponse, AppError> {
    let document = EmployeeDocument::from_payload(&new_employee);
    let employee_id = store.insert(&document).await?;

    let mut employee = new_employee.into_inner();
    employee.id = employee_id.to_hex();

    Ok(HttpResponse::Created().json(employee))
}

pub async fn update_employee(
    store: web::Data<dyn EmployeeStore>,
    path: web::Path<String>,
    updates: web::Json<Employee>,
) -> Result<HttpResponse, AppError> {
    let id_param = path.into_inner();
    let id = parse_id(&id_param)?;

    let document = EmployeeDocument::from_payload(&updates);
    if !store.replace_fields(id, &document).await? {
        return Err(AppError::BadRequest("Employee not found".to_string()));
    }

    let mut employee = updates.into_inner();
    employee.id = id_param;

    Ok(HttpResponse::Ok().json(employee))
}

pub async fn delete_employee(
    store: web::Data<dyn EmployeeStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = parse_id(&path.into_inner())?;

    if store.delete(id).await? < 1 {
        return Err(AppError::NotFound("Employee not found".to_string()));
    }

    Ok(HttpResponse::NoContent().finish())
}
