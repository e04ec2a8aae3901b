//! `aws-sdk-dynamodb` adapter for [`PageSource`].
//!
//! The client handle is caller-owned: construct it once (credentials,
//! region, endpoint -- all the session state lives there) and inject it.
//! The adapter translates between the crate's wire model and the SDK's
//! types and maps SDK failures onto the scan error taxonomy.

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::error::{ProvideErrorMetadata, SdkError};
use aws_sdk_dynamodb::operation::scan::ScanError as SdkScanError;
use aws_sdk_dynamodb::primitives::Blob;
use aws_sdk_dynamodb::types::AttributeValue as SdkAttributeValue;
use aws_smithy_runtime_api::client::orchestrator::HttpResponse;
use bytes::Bytes;
use tablescan_model::{AttributeValue, Cursor, Item, PageRequest, RemoteErrorKind, ScanPage};

use crate::error::ScanError;
use crate::record::DeserializationError;
use crate::source::PageSource;

/// [`PageSource`] backed by a caller-owned DynamoDB client.
#[derive(Debug, Clone)]
pub struct DynamoDbSource {
    client: Client,
}

impl DynamoDbSource {
    /// Wrap an already-configured client handle.
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageSource for DynamoDbSource {
    async fn fetch_page(
        &self,
        request: &PageRequest,
        cursor: Option<&Cursor>,
    ) -> Result<ScanPage, ScanError> {
        let mut scan = self.client.scan().table_name(&request.table_name);
        if let Some(filter) = &request.filter_expression {
            scan = scan.filter_expression(filter);
        }
        if let Some(projection) = &request.projection_expression {
            scan = scan.projection_expression(projection);
        }
        if !request.expression_attribute_names.is_empty() {
            scan = scan
                .set_expression_attribute_names(Some(request.expression_attribute_names.clone()));
        }
        if !request.expression_attribute_values.is_empty() {
            let values = request
                .expression_attribute_values
                .iter()
                .map(|(token, value)| (token.clone(), to_sdk_value(value)))
                .collect();
            scan = scan.set_expression_attribute_values(Some(values));
        }
        if let Some(consistent) = request.consistent_read {
            scan = scan.consistent_read(consistent);
        }
        if let Some(cursor) = cursor {
            scan = scan.set_exclusive_start_key(Some(to_sdk_item(cursor.as_key())));
        }

        let output = scan.send().await.map_err(classify_sdk_error)?;

        let items = output
            .items
            .unwrap_or_default()
            .into_iter()
            .map(from_sdk_item)
            .collect::<Result<Vec<Item>, _>>()?;
        let last_evaluated_key = output
            .last_evaluated_key
            .map(from_sdk_item)
            .transpose()?
            .and_then(Cursor::from_key);

        Ok(ScanPage {
            items,
            last_evaluated_key,
        })
    }
}

fn to_sdk_item(item: &Item) -> std::collections::HashMap<String, SdkAttributeValue> {
    item.iter()
        .map(|(name, value)| (name.clone(), to_sdk_value(value)))
        .collect()
}

fn to_sdk_value(value: &AttributeValue) -> SdkAttributeValue {
    match value {
        AttributeValue::S(s) => SdkAttributeValue::S(s.clone()),
        AttributeValue::N(n) => SdkAttributeValue::N(n.clone()),
        AttributeValue::B(b) => SdkAttributeValue::B(Blob::new(b.to_vec())),
        AttributeValue::Ss(v) => SdkAttributeValue::Ss(v.clone()),
        AttributeValue::Ns(v) => SdkAttributeValue::Ns(v.clone()),
        AttributeValue::Bs(v) => {
            SdkAttributeValue::Bs(v.iter().map(|b| Blob::new(b.to_vec())).collect())
        }
        AttributeValue::Bool(b) => SdkAttributeValue::Bool(*b),
        AttributeValue::Null(b) => SdkAttributeValue::Null(*b),
        AttributeValue::L(l) => SdkAttributeValue::L(l.iter().map(to_sdk_value).collect()),
        AttributeValue::M(m) => SdkAttributeValue::M(
            m.iter()
                .map(|(name, value)| (name.clone(), to_sdk_value(value)))
                .collect(),
        ),
    }
}

fn from_sdk_item(
    item: std::collections::HashMap<String, SdkAttributeValue>,
) -> Result<Item, DeserializationError> {
    item.into_iter()
        .map(|(name, value)| Ok((name, from_sdk_value(value)?)))
        .collect()
}

fn from_sdk_value(value: SdkAttributeValue) -> Result<AttributeValue, DeserializationError> {
    Ok(match value {
        SdkAttributeValue::S(s) => AttributeValue::S(s),
        SdkAttributeValue::N(n) => AttributeValue::N(n),
        SdkAttributeValue::B(b) => AttributeValue::B(Bytes::from(b.into_inner())),
        SdkAttributeValue::Ss(v) => AttributeValue::Ss(v),
        SdkAttributeValue::Ns(v) => AttributeValue::Ns(v),
        SdkAttributeValue::Bs(v) => {
            AttributeValue::Bs(v.into_iter().map(|b| Bytes::from(b.into_inner())).collect())
        }
        SdkAttributeValue::Bool(b) => AttributeValue::Bool(b),
        SdkAttributeValue::Null(b) => AttributeValue::Null(b),
        SdkAttributeValue::L(l) => {
            AttributeValue::L(l.into_iter().map(from_sdk_value).collect::<Result<_, _>>()?)
        }
        SdkAttributeValue::M(m) => AttributeValue::M(
            m.into_iter()
                .map(|(name, value)| Ok((name, from_sdk_value(value)?)))
                .collect::<Result<_, DeserializationError>>()?,
        ),
        other => {
            return Err(DeserializationError::UnsupportedValue {
                detail: format!("{other:?}"),
            });
        }
    })
}

fn classify_sdk_error(err: SdkError<SdkScanError, HttpResponse>) -> ScanError {
    if let SdkError::ServiceError(ctx) = &err {
        let service = ctx.err();
        return classify_service_error(service.code(), service.message());
    }
    // Everything below a service response is a transport-level failure:
    // construction, connect, timeout, or an unparseable response.
    ScanError::Connection {
        message: err.to_string(),
        source: Some(Box::new(err)),
    }
}

fn classify_service_error(code: Option<&str>, message: Option<&str>) -> ScanError {
    let kind = code.map_or(RemoteErrorKind::Other, RemoteErrorKind::from_code);
    let message = message
        .or(code)
        .unwrap_or("the store returned no error detail")
        .to_owned();
    if kind.is_connection() {
        ScanError::Connection {
            message: format!("the store rejected the session ({kind}): {message}"),
            source: None,
        }
    } else {
        ScanError::request(kind, message)
    }
}
