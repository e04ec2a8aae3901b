//! Scanner integration tests against a running DynamoDB-compatible store.

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use aws_sdk_dynamodb::types::{
        AttributeDefinition, AttributeValue, BillingMode, KeySchemaElement, KeyType,
        ScalarAttributeType,
    };
    use tablescan_core::expression::{Path, Projection};
    use tablescan_core::record::{DeserializationError, FromItem, ItemReader};
    use tablescan_core::scanner::{FilteredScanner, ScanOptions};
    use tablescan_core::sdk::DynamoDbSource;
    use tablescan_core::ScanError;
    use tablescan_model::{Item, RemoteErrorKind, TableRef};

    use crate::{dynamodb_client, test_table_name};

    #[derive(Debug, Clone, PartialEq)]
    struct Movie {
        year: i64,
        title: String,
        rating: f64,
    }

    impl FromItem for Movie {
        fn from_item(item: &Item) -> std::result::Result<Self, DeserializationError> {
            let reader = ItemReader::new(item);
            Ok(Self {
                year: reader.integer("year")?,
                title: reader.string("title")?.to_owned(),
                rating: reader.float("info.rating")?,
            })
        }
    }

    /// Helper: create a movies table keyed on year (hash) + title (range).
    async fn create_movies_table(client: &aws_sdk_dynamodb::Client, table_name: &str) {
        client
            .create_table()
            .table_name(table_name)
            .key_schema(
                KeySchemaElement::builder()
                    .attribute_name("year")
                    .key_type(KeyType::Hash)
                    .build()
                    .unwrap(),
            )
            .key_schema(
                KeySchemaElement::builder()
                    .attribute_name("title")
                    .key_type(KeyType::Range)
                    .build()
                    .unwrap(),
            )
            .attribute_definitions(
                AttributeDefinition::builder()
                    .attribute_name("year")
                    .attribute_type(ScalarAttributeType::N)
                    .build()
                    .unwrap(),
            )
            .attribute_definitions(
                AttributeDefinition::builder()
                    .attribute_name("title")
                    .attribute_type(ScalarAttributeType::S)
                    .build()
                    .unwrap(),
            )
            .billing_mode(BillingMode::PayPerRequest)
            .send()
            .await
            .unwrap_or_else(|e| panic!("failed to create table {table_name}: {e}"));
    }

    /// Helper: insert one movie with a nested info map.
    async fn put_movie(
        client: &aws_sdk_dynamodb::Client,
        table_name: &str,
        year: i64,
        title: &str,
        rating: f64,
    ) {
        let info = std::collections::HashMap::from([(
            "rating".to_owned(),
            AttributeValue::N(rating.to_string()),
        )]);
        client
            .put_item()
            .table_name(table_name)
            .item("year", AttributeValue::N(year.to_string()))
            .item("title", AttributeValue::S(title.to_owned()))
            .item("info", AttributeValue::M(info))
            .send()
            .await
            .unwrap_or_else(|e| panic!("failed to put {title}: {e}"));
    }

    async fn delete_table(client: &aws_sdk_dynamodb::Client, table_name: &str) {
        let _ = client.delete_table().table_name(table_name).send().await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_scan_with_remote_filter_and_local_predicate() -> Result<()> {
        let client = dynamodb_client();
        let table_name = test_table_name("scenario");
        create_movies_table(&client, &table_name).await;
        put_movie(&client, &table_name, 2011, "A", 8.5).await;
        put_movie(&client, &table_name, 2011, "B", 7.0).await;
        put_movie(&client, &table_name, 2012, "C", 9.0).await;

        let scanner = FilteredScanner::new(DynamoDbSource::new(client.clone()));
        let result = scanner
            .scan::<Movie, _>(
                &TableRef::new(table_name.clone())?,
                Some(Path::parse("year")?.equals(2011)),
                Some(Projection::new(["title", "year", "info.rating"])?),
                |movie| movie.rating > 8.0,
                &ScanOptions::default(),
            )
            .await?;

        assert_eq!(result.count, 1);
        assert_eq!(result.records[0].title, "A");
        assert!((result.records[0].rating - 8.5).abs() < f64::EPSILON);

        delete_table(&client, &table_name).await;
        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_scan_whole_table_when_filters_are_noops() -> Result<()> {
        let client = dynamodb_client();
        let table_name = test_table_name("noop");
        create_movies_table(&client, &table_name).await;
        put_movie(&client, &table_name, 2011, "A", 8.5).await;
        put_movie(&client, &table_name, 2011, "B", 7.0).await;
        put_movie(&client, &table_name, 2012, "C", 9.0).await;

        let scanner = FilteredScanner::new(DynamoDbSource::new(client.clone()));
        let result = scanner
            .scan::<Movie, _>(
                &TableRef::new(table_name.clone())?,
                None,
                None,
                |_| true,
                &ScanOptions::default(),
            )
            .await?;

        assert_eq!(result.count, 3);

        delete_table(&client, &table_name).await;
        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_report_missing_table_as_request_error() -> Result<()> {
        let client = dynamodb_client();
        let scanner = FilteredScanner::new(DynamoDbSource::new(client));

        let err = scanner
            .scan::<Movie, _>(
                &TableRef::new(test_table_name("missing"))?,
                None,
                None,
                |_| true,
                &ScanOptions::default(),
            )
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ScanError::Request {
                kind: RemoteErrorKind::ResourceNotFound,
                ..
            }
        ));
        Ok(())
    }

    /// Force multi-page pagination by padding each row past the store's
    /// per-page size cap, then check nothing is dropped or duplicated at
    /// page edges.
    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_paginate_across_page_size_cap() -> Result<()> {
        let client = dynamodb_client();
        let table_name = test_table_name("paging");
        create_movies_table(&client, &table_name).await;

        let padding = "x".repeat(100_000);
        for i in 0..40 {
            let info = std::collections::HashMap::from([(
                "rating".to_owned(),
                AttributeValue::N("5".to_owned()),
            )]);
            client
                .put_item()
                .table_name(&table_name)
                .item("year", AttributeValue::N("2011".to_owned()))
                .item("title", AttributeValue::S(format!("title-{i:03}")))
                .item("info", AttributeValue::M(info))
                .item("padding", AttributeValue::S(padding.clone()))
                .send()
                .await
                .unwrap_or_else(|e| panic!("failed to put item {i}: {e}"));
        }

        let scanner = FilteredScanner::new(DynamoDbSource::new(client.clone()));
        let result = scanner
            .scan::<Movie, _>(
                &TableRef::new(table_name.clone())?,
                None,
                Some(Projection::new(["title", "year", "info.rating"])?),
                |_| true,
                &ScanOptions::default(),
            )
            .await?;

        assert_eq!(result.count, 40);
        let mut titles: Vec<&str> = result.records.iter().map(|m| m.title.as_str()).collect();
        titles.sort_unstable();
        titles.dedup();
        assert_eq!(titles.len(), 40);

        delete_table(&client, &table_name).await;
        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_stream_records_from_live_table() -> Result<()> {
        use futures::TryStreamExt;

        let client = dynamodb_client();
        let table_name = test_table_name("stream");
        create_movies_table(&client, &table_name).await;
        put_movie(&client, &table_name, 2011, "A", 8.5).await;
        put_movie(&client, &table_name, 2012, "C", 9.0).await;

        let scanner = FilteredScanner::new(DynamoDbSource::new(client.clone()));
        let records: Vec<Movie> = scanner
            .scan_stream(
                &TableRef::new(table_name.clone())?,
                None,
                None,
                |movie: &Movie| movie.rating > 8.0,
                &ScanOptions::default(),
            )
            .try_collect()
            .await?;

        assert_eq!(records.len(), 2);

        delete_table(&client, &table_name).await;
        Ok(())
    }
}
