//! Row store engine
//!
//! Query flow, per call:
//! 1. Normalize every predicate and resolve it to a column position
//! 2. Resolve grouping and aggregated fields
//! 3. Pick candidate rows: an index posting list when an equality predicate
//!    hits an indexed field, otherwise every row
//! 4. Scan candidates in row order, keeping rows where all predicates hold
//!
//! Any resolution failure rejects the call before a single row is read.

use std::collections::{BTreeMap, HashSet};

use indexmap::IndexMap;

use super::config::StoreConfig;
use super::errors::{StoreError, StoreResult};
use super::filtered::{Candidates, Filtered, ResolvedPredicate};
use super::index::FieldIndex;
use super::schema::{project, Row, Schema};
use crate::accumulator::Accumulator;
use crate::filter::{PredicateExpr, PredicateTranslator};
use crate::observability::{log_event, Event, MetricsSnapshot, ObservationScope, StoreMetrics};
use crate::value::{GroupKey, Value};

/// In-memory table of fixed-arity rows
#[derive(Debug)]
pub struct RowStore {
    schema: Schema,
    rows: Vec<Row>,
    indexes: BTreeMap<String, FieldIndex>,
    config: StoreConfig,
    metrics: StoreMetrics,
}

impl RowStore {
    /// Wraps `rows` under `fields` with the default configuration
    pub fn new<I, S>(rows: Vec<Row>, fields: I) -> StoreResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_config(rows, fields, StoreConfig::default())
    }

    /// Wraps `rows` under `fields`, building every configured index.
    ///
    /// Fails on duplicate field names, rows of the wrong arity, and index
    /// fields missing from the schema.
    pub fn with_config<I, S>(rows: Vec<Row>, fields: I, config: StoreConfig) -> StoreResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let schema = Schema::new(fields)?;
        for (row_number, row) in rows.iter().enumerate() {
            schema.check_arity(row_number, row)?;
        }

        let severity = config.routine_severity();
        let mut indexes = BTreeMap::new();
        for field in &config.index_fields {
            if indexes.contains_key(field) {
                continue;
            }
            let index = FieldIndex::build(schema.position(field)?, &rows);
            let keys = index.key_count().to_string();
            log_event(
                Event::IndexBuilt,
                severity,
                &[("field", field.as_str()), ("keys", keys.as_str())],
            );
            indexes.insert(field.clone(), index);
        }

        let (row_count, field_count, index_count) = (
            rows.len().to_string(),
            schema.len().to_string(),
            indexes.len().to_string(),
        );
        log_event(
            Event::StoreCreated,
            severity,
            &[
                ("rows", row_count.as_str()),
                ("fields", field_count.as_str()),
                ("indexes", index_count.as_str()),
            ],
        );

        Ok(Self {
            schema,
            rows,
            indexes,
            config,
            metrics: StoreMetrics::new(),
        })
    }

    /// Appends one row and updates every index
    pub fn append(&mut self, row: Row) -> StoreResult<()> {
        let position = self.rows.len();
        self.schema.check_arity(position, &row)?;

        for index in self.indexes.values_mut() {
            index.insert_row(position, &row);
        }
        self.rows.push(row);
        self.metrics.increment_rows_appended();

        let position = position.to_string();
        log_event(
            Event::RowAppended,
            self.config.routine_severity(),
            &[("position", position.as_str())],
        );
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row at `position`
    pub fn get(&self, position: usize) -> Option<&Row> {
        self.rows.get(position)
    }

    /// Raw rows in stored order
    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }

    /// Rows as `(field, value)` pairs
    pub fn iter_pairs(&self) -> impl Iterator<Item = Vec<(&str, &Value)>> + '_ {
        self.rows.iter().map(move |row| {
            self.schema
                .fields()
                .iter()
                .map(String::as_str)
                .zip(row.iter())
                .collect()
        })
    }

    /// Rows as field-ordered records
    pub fn iter_records(&self) -> impl Iterator<Item = IndexMap<&str, &Value>> + '_ {
        self.iter_pairs().map(|pairs| pairs.into_iter().collect())
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn fields(&self) -> &[String] {
        self.schema.fields()
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Current query counters
    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// JSON array with one object per row
    pub fn to_json(&self) -> serde_json::Value {
        self.iter_pairs()
            .map(|pairs| {
                let object: serde_json::Map<String, serde_json::Value> = pairs
                    .into_iter()
                    .map(|(field, value)| (field.to_string(), value.to_json()))
                    .collect();
                serde_json::Value::Object(object)
            })
            .collect()
    }

    pub fn is_indexed(&self, field: &str) -> bool {
        self.indexes.contains_key(field)
    }

    /// Positions of rows whose `field` equals `value`, ascending
    pub fn lookup(&self, field: &str, value: &Value) -> StoreResult<&[usize]> {
        self.schema.position(field)?;
        self.indexes
            .get(field)
            .map(|index| index.lookup(value))
            .ok_or_else(|| StoreError::NotIndexed(field.to_string()))
    }

    /// Lazily yields rows satisfying every predicate, in stored order.
    ///
    /// Unknown fields and operators fail here, before any row is read.
    pub fn filter<I, E>(&self, predicates: I) -> StoreResult<Filtered<'_>>
    where
        I: IntoIterator<Item = E>,
        E: Into<PredicateExpr>,
    {
        let predicates = self.resolve(predicates).map_err(|e| self.rejected(e))?;
        self.metrics.increment_queries_executed();
        Ok(self.scan(predicates))
    }

    /// Distinct projections of the filtered rows onto `fields`
    pub fn distinct<S, I, E>(&self, fields: &[S], predicates: I) -> StoreResult<HashSet<GroupKey>>
    where
        S: AsRef<str>,
        I: IntoIterator<Item = E>,
        E: Into<PredicateExpr>,
    {
        let projected = join_fields(fields);
        let scope = ObservationScope::with_fields(
            "DISTINCT",
            self.config.routine_severity(),
            &[("fields", projected.as_str())],
        );

        let resolved = self
            .schema
            .positions(fields)
            .and_then(|positions| Ok((positions, self.resolve(predicates)?)));
        let (positions, predicates) = match resolved {
            Ok(resolved) => resolved,
            Err(e) => {
                scope.fail(&e.to_string());
                return Err(self.rejected(e));
            }
        };

        let values: HashSet<GroupKey> = self
            .scan(predicates)
            .map(|row| project(row, &positions))
            .collect();

        self.metrics.increment_queries_executed();
        let distinct = values.len().to_string();
        scope.complete_with_fields(&[("distinct", distinct.as_str())]);
        Ok(values)
    }

    /// Feeds every filtered row into the given accumulators.
    ///
    /// Each row is keyed by its projection onto `group_fields`; each
    /// `(field, accumulator)` pair observes that row's `field` value. The
    /// accumulators come back populated, in input order.
    pub fn aggregate<G, A, F, I, E>(
        &self,
        group_fields: &[G],
        accumulators: A,
        predicates: I,
    ) -> StoreResult<Vec<Accumulator>>
    where
        G: AsRef<str>,
        A: IntoIterator<Item = (F, Accumulator)>,
        F: AsRef<str>,
        I: IntoIterator<Item = E>,
        E: Into<PredicateExpr>,
    {
        let grouping = join_fields(group_fields);
        let scope = ObservationScope::with_fields(
            "AGGREGATE",
            self.config.routine_severity(),
            &[("group_by", grouping.as_str())],
        );

        let resolved = self.resolve_aggregate(group_fields, accumulators, predicates);
        let (group_positions, mut targets, predicates) = match resolved {
            Ok(resolved) => resolved,
            Err(e) => {
                scope.fail(&e.to_string());
                return Err(self.rejected(e));
            }
        };

        let mut matched = 0usize;
        for row in self.scan(predicates) {
            let key = project(row, &group_positions);
            for (position, accumulator) in targets.iter_mut() {
                if let Err(e) = accumulator.observe(&key, &row[*position]) {
                    scope.fail(&e.to_string());
                    return Err(e.into());
                }
            }
            matched += 1;
        }

        self.metrics.increment_queries_executed();
        let (matched, accumulator_count) = (matched.to_string(), targets.len().to_string());
        scope.complete_with_fields(&[
            ("rows", matched.as_str()),
            ("accumulators", accumulator_count.as_str()),
        ]);
        Ok(targets.into_iter().map(|(_, accumulator)| accumulator).collect())
    }

    /// Normalizes and binds every predicate
    fn resolve<I, E>(&self, predicates: I) -> StoreResult<Vec<ResolvedPredicate>>
    where
        I: IntoIterator<Item = E>,
        E: Into<PredicateExpr>,
    {
        predicates
            .into_iter()
            .map(|expr| {
                let predicate = PredicateTranslator::normalize(expr)?;
                ResolvedPredicate::resolve(&self.schema, predicate)
            })
            .collect()
    }

    #[allow(clippy::type_complexity)]
    fn resolve_aggregate<G, A, F, I, E>(
        &self,
        group_fields: &[G],
        accumulators: A,
        predicates: I,
    ) -> StoreResult<(Vec<usize>, Vec<(usize, Accumulator)>, Vec<ResolvedPredicate>)>
    where
        G: AsRef<str>,
        A: IntoIterator<Item = (F, Accumulator)>,
        F: AsRef<str>,
        I: IntoIterator<Item = E>,
        E: Into<PredicateExpr>,
    {
        let group_positions = self.schema.positions(group_fields)?;
        let targets = accumulators
            .into_iter()
            .map(|(field, accumulator)| Ok((self.schema.position(field.as_ref())?, accumulator)))
            .collect::<StoreResult<Vec<_>>>()?;
        let predicates = self.resolve(predicates)?;
        Ok((group_positions, targets, predicates))
    }

    /// Starts a scan over resolved predicates
    fn scan(&self, predicates: Vec<ResolvedPredicate>) -> Filtered<'_> {
        let candidates = self.plan(&predicates);
        let source = match candidates {
            Candidates::All(_) => "scan",
            Candidates::Indexed(_) => "index",
        };
        let predicate_count = predicates.len().to_string();
        log_event(
            Event::FilterStart,
            self.config.routine_severity(),
            &[("predicates", predicate_count.as_str()), ("source", source)],
        );
        Filtered::new(&self.rows, candidates, predicates, &self.metrics)
    }

    /// Uses the shortest posting list among indexed equality predicates
    fn plan(&self, predicates: &[ResolvedPredicate]) -> Candidates<'_> {
        predicates
            .iter()
            .map(ResolvedPredicate::predicate)
            .filter(|p| p.is_equality())
            .filter_map(|p| self.indexes.get(&p.field).map(|index| index.lookup(&p.value)))
            .min_by_key(|positions| positions.len())
            .map(|positions| Candidates::Indexed(positions.iter()))
            .unwrap_or_else(|| Candidates::All(0..self.rows.len()))
    }

    fn rejected(&self, error: StoreError) -> StoreError {
        self.metrics.increment_queries_rejected();
        let reason = error.to_string();
        log_event(
            Event::QueryRejected,
            self.config.routine_severity(),
            &[("code", error.code()), ("reason", reason.as_str())],
        );
        error
    }
}

/// Comma-joined field names for log fields
fn join_fields<S: AsRef<str>>(fields: &[S]) -> String {
    fields
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<&str>>()
        .join(",")
}

impl<'a> IntoIterator for &'a RowStore {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
