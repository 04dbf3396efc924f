//! Request execution - routes parsed fields into the core services and
//! renders results or errors in the response envelope.
//!
//! The envelope mirrors the usual single-endpoint convention: `{data}` on
//! success, `{errors: [{message, extensions: {category, trace?}}]}` on
//! failure, with `trace` only present in debug mode.

use crate::{
    api::parser::{self, Field, Operation, ParseError},
    core::{catalog, category, order},
    errors::Error,
};
use sea_orm::DatabaseConnection;
use serde_json::{Map, Value, json};
use tracing::debug;

/// An incoming request body.
#[derive(Debug, Clone, Default, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQLRequest {
    /// The query document
    #[serde(default)]
    pub query: String,
    /// Values for `$variable` references
    #[serde(default)]
    pub variables: Option<Map<String, Value>>,
    /// Which operation to run when the document contains several
    #[serde(default)]
    pub operation_name: Option<String>,
}

/// A failure while handling one request, tagged with its response category.
struct RequestError {
    message: String,
    category: &'static str,
    detail: Option<String>,
}

impl RequestError {
    /// A malformed-request failure (bad syntax, bad arguments).
    fn request(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            category: "graphql",
            detail: None,
        }
    }
}

impl From<ParseError> for RequestError {
    fn from(e: ParseError) -> Self {
        Self::request(e.0)
    }
}

impl From<Error> for RequestError {
    fn from(e: Error) -> Self {
        let category = if e.is_validation() {
            "validation"
        } else {
            "internal"
        };
        Self {
            message: e.to_string(),
            category,
            detail: Some(format!("{e:?}")),
        }
    }
}

/// Executes one request against the database and renders the response
/// envelope. Never fails: every error becomes an error envelope.
pub async fn execute(db: &DatabaseConnection, debug_mode: bool, request: GraphQLRequest) -> Value {
    match run(db, &request).await {
        Ok(data) => json!({ "data": data }),
        Err(e) => {
            debug!("Request failed ({}): {}", e.category, e.message);
            let mut extensions = Map::new();
            extensions.insert("category".to_string(), Value::String(e.category.to_string()));
            if debug_mode {
                if let Some(detail) = e.detail {
                    extensions.insert("trace".to_string(), Value::String(detail));
                }
            }
            json!({ "errors": [{ "message": e.message, "extensions": extensions }] })
        }
    }
}

async fn run(db: &DatabaseConnection, request: &GraphQLRequest) -> Result<Value, RequestError> {
    let operations = parser::parse(&request.query)?;
    let operation = select_operation(operations, request.operation_name.as_deref())?;

    let empty = Map::new();
    let variables = request.variables.as_ref().unwrap_or(&empty);

    let mut data = Map::new();
    for field in &operation.fields {
        let value = resolve_field(db, field, variables).await?;
        data.insert(field.response_key().to_string(), value);
    }
    Ok(Value::Object(data))
}

fn select_operation(
    operations: Vec<Operation>,
    operation_name: Option<&str>,
) -> Result<Operation, RequestError> {
    match operation_name {
        Some(name) => operations
            .into_iter()
            .find(|op| op.name.as_deref() == Some(name))
            .ok_or_else(|| RequestError::request(format!("Unknown operation named \"{name}\""))),
        None => {
            let mut iter = operations.into_iter();
            match (iter.next(), iter.next()) {
                (Some(operation), None) => Ok(operation),
                _ => Err(RequestError::request(
                    "Must provide operationName when the document contains multiple operations",
                )),
            }
        }
    }
}

async fn resolve_field(
    db: &DatabaseConnection,
    field: &Field,
    variables: &Map<String, Value>,
) -> Result<Value, RequestError> {
    let args = Arguments::resolve(field, variables)?;

    match field.name.as_str() {
        "categories" => to_json(category::get_all_categories(db).await?),
        "category" => {
            let name = args.required_str("name")?;
            to_json(category::get_category_by_name(db, &name).await?)
        }
        "products" => {
            let category_name = args
                .optional_str("category")?
                .unwrap_or_else(|| "all".to_string());
            to_json(catalog::get_products_by_category(db, &category_name).await?)
        }
        "product" => {
            let id = args.required_str("id")?;
            to_json(catalog::get_product_by_id(db, &id).await?)
        }
        "order" => {
            let id = args.required_int("id")?;
            to_json(order::get_order_by_id(db, id).await?)
        }
        "createOrder" => {
            let items = serde_json::from_value(args.required("items")?).map_err(|e| {
                RequestError::request(format!("Invalid value for argument \"items\": {e}"))
            })?;
            to_json(order::create_order(db, items).await?)
        }
        other => Err(RequestError::request(format!(
            "Cannot query field \"{other}\""
        ))),
    }
}

fn to_json<T: serde::Serialize>(value: T) -> Result<Value, RequestError> {
    serde_json::to_value(value).map_err(|e| RequestError::from(Error::from(e)))
}

/// Resolved arguments of one field.
struct Arguments(Map<String, Value>);

impl Arguments {
    fn resolve(field: &Field, variables: &Map<String, Value>) -> Result<Self, RequestError> {
        let mut map = Map::with_capacity(field.arguments.len());
        for (name, raw) in &field.arguments {
            map.insert(name.clone(), raw.resolve(variables)?);
        }
        Ok(Self(map))
    }

    fn required(&self, name: &str) -> Result<Value, RequestError> {
        self.0
            .get(name)
            .cloned()
            .ok_or_else(|| RequestError::request(format!("Missing required argument \"{name}\"")))
    }

    fn required_str(&self, name: &str) -> Result<String, RequestError> {
        match self.required(name)? {
            Value::String(s) => Ok(s),
            other => Err(RequestError::request(format!(
                "Argument \"{name}\" must be a string, got {other}"
            ))),
        }
    }

    fn optional_str(&self, name: &str) -> Result<Option<String>, RequestError> {
        match self.0.get(name) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(other) => Err(RequestError::request(format!(
                "Argument \"{name}\" must be a string, got {other}"
            ))),
        }
    }

    fn required_int(&self, name: &str) -> Result<i32, RequestError> {
        let value = self.required(name)?;
        value
            .as_i64()
            .and_then(|i| i32::try_from(i).ok())
            .ok_or_else(|| {
                RequestError::request(format!("Argument \"{name}\" must be an integer, got {value}"))
            })
    }
}
