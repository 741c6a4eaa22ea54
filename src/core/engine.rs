//! Filter / search / sort / paginate engine
//!
//! A [`QueryRequest`] is first compiled against an entity's field registry.
//! Compilation performs every validation step: paging bounds, field
//! resolution, value parsing, operator compatibility, search fields and
//! sort resolution. Only a successfully compiled query ever touches data,
//! so an invalid request never produces a partial result.
//!
//! Stages, in order:
//!
//! 1. paging bounds (`pageSize`, then `pageNumber`)
//! 2. filter criteria, AND-combined
//! 3. free-text search, OR across searchable fields, AND-ed with stage 2
//! 4. stable sort by one field (ties keep the store's order)
//! 5. offset pagination

use crate::core::deadline::Deadline;
use crate::core::entity::Data;
use crate::core::error::{QueryError, RegistrarResult};
use crate::core::field::{FieldDef, FieldValue};
use crate::core::filter::{FilterCriterion, FilterOperator};
use crate::core::query::{PageRequest, QueryRequest, SortOrder};
use crate::core::store::QueryableStore;
use std::cmp::Ordering;
use std::marker::PhantomData;

/// One compiled filter criterion
#[derive(Debug, Clone)]
struct Predicate {
    field: &'static FieldDef,
    operator: FilterOperator,
    operand: Operand,
}

#[derive(Debug, Clone)]
enum Operand {
    /// Parsed value for equality and ordering operators
    Value(FieldValue),
    /// Lowercased needle for `Contains`
    Needle(String),
}

impl Predicate {
    fn compile<T: Data>(criterion: &FilterCriterion) -> Result<Self, QueryError> {
        let field = T::field(&criterion.property_name)
            .ok_or_else(|| QueryError::UnknownField(criterion.property_name.clone()))?;

        let parsed = field
            .kind
            .parse(&criterion.value)
            .map_err(|_| QueryError::InvalidFilterValue {
                field: criterion.property_name.clone(),
                value: criterion.value.clone(),
                expected: field.kind,
            })?;

        let unsupported = match criterion.operator {
            FilterOperator::Contains => !field.kind.is_textual(),
            op if op.is_ordering() => !field.kind.is_orderable(),
            _ => false,
        };
        if unsupported {
            return Err(QueryError::UnsupportedOperator {
                field: criterion.property_name.clone(),
                operator: criterion.operator,
                kind: field.kind,
            });
        }

        let operand = match criterion.operator {
            FilterOperator::Contains => Operand::Needle(criterion.value.to_lowercase()),
            _ => Operand::Value(parsed),
        };

        Ok(Self {
            field,
            operator: criterion.operator,
            operand,
        })
    }

    fn matches<T: Data>(&self, record: &T) -> bool {
        let actual = record
            .field_value(self.field.name)
            .unwrap_or(FieldValue::Null);

        match &self.operand {
            Operand::Needle(needle) => actual.contains_lowercase(needle),
            Operand::Value(expected) => {
                // a missing value only satisfies NotEqual
                if actual.is_null() {
                    return self.operator == FilterOperator::NotEqual;
                }
                match self.operator {
                    FilterOperator::Equal => actual == *expected,
                    FilterOperator::NotEqual => actual != *expected,
                    FilterOperator::GreaterThan => actual.compare(expected) == Ordering::Greater,
                    FilterOperator::LessThan => actual.compare(expected) == Ordering::Less,
                    FilterOperator::GreaterThanOrEqual => {
                        actual.compare(expected) != Ordering::Less
                    }
                    FilterOperator::LessThanOrEqual => {
                        actual.compare(expected) != Ordering::Greater
                    }
                    FilterOperator::Contains => false,
                }
            }
        }
    }
}

#[derive(Debug, Clone)]
struct Search {
    needle: String,
    fields: Vec<&'static FieldDef>,
}

impl Search {
    fn matches<T: Data>(&self, record: &T) -> bool {
        self.fields.iter().any(|field| {
            record
                .field_value(field.name)
                .is_some_and(|value| value.contains_lowercase(&self.needle))
        })
    }
}

#[derive(Debug, Clone, Copy)]
struct SortKey {
    field: &'static FieldDef,
    order: SortOrder,
}

/// A validated query, ready to run against any sequence of `T`
#[derive(Debug, Clone)]
pub struct CompiledQuery<T> {
    predicates: Vec<Predicate>,
    search: Option<Search>,
    sort: Option<SortKey>,
    page: PageRequest,
    _marker: PhantomData<fn(&T)>,
}

impl QueryRequest {
    /// Validate this request against `T`'s field registry
    pub fn compile<T: Data>(&self) -> Result<CompiledQuery<T>, QueryError> {
        let page = PageRequest::new(self.page_number, self.page_size)?;

        let predicates = self
            .filters
            .iter()
            .map(Predicate::compile::<T>)
            .collect::<Result<Vec<_>, _>>()?;

        let search = match self.search_term.as_deref() {
            Some(term) if !term.is_empty() => {
                let fields = T::search_targets()
                    .map_err(|name| QueryError::UnknownField(name.to_string()))?;
                Some(Search {
                    needle: term.to_lowercase(),
                    fields,
                })
            }
            _ => None,
        };

        let sort = match self.sort_field.as_deref() {
            Some(name) if !name.is_empty() => {
                let field =
                    T::field(name).ok_or_else(|| QueryError::UnknownField(name.to_string()))?;
                let order = self.sort_order.parse::<SortOrder>()?;
                Some(SortKey { field, order })
            }
            _ => None,
        };

        tracing::debug!(
            entity = T::resource_name(),
            filters = predicates.len(),
            search = search.is_some(),
            sort = ?sort.map(|s| (s.field.name, s.order)),
            page_number = page.page_number,
            page_size = page.page_size,
            "compiled query"
        );

        Ok(CompiledQuery {
            predicates,
            search,
            sort,
            page,
            _marker: PhantomData,
        })
    }
}

impl<T: Data> CompiledQuery<T> {
    /// The validated page window
    pub fn page(&self) -> PageRequest {
        self.page
    }

    /// Whether a record passes every filter criterion and the search term
    pub fn matches(&self, record: &T) -> bool {
        self.predicates.iter().all(|p| p.matches(record))
            && self.search.as_ref().is_none_or(|s| s.matches(record))
    }

    /// Ordering of two records under this query's sort key
    ///
    /// Returns `Equal` when the query does not sort.
    pub fn compare(&self, a: &T, b: &T) -> Ordering {
        match &self.sort {
            Some(key) => {
                let left = a.field_value(key.field.name).unwrap_or(FieldValue::Null);
                let right = b.field_value(key.field.name).unwrap_or(FieldValue::Null);
                match key.order {
                    SortOrder::Asc => left.compare(&right),
                    SortOrder::Desc => right.compare(&left),
                }
            }
            None => Ordering::Equal,
        }
    }

    /// Filter, search, sort and paginate `records`
    pub fn apply<I>(&self, records: I) -> Vec<T>
    where
        I: IntoIterator<Item = T>,
    {
        let matching = records.into_iter().filter(|record| self.matches(record));
        self.paginate(matching)
    }

    /// Sort and paginate records that already passed [`matches`](Self::matches)
    ///
    /// Stores that evaluate the predicate themselves finish the query here.
    pub fn paginate<I>(&self, matching: I) -> Vec<T>
    where
        I: IntoIterator<Item = T>,
    {
        let offset = self.page.offset();
        let limit = self.page.limit();

        let Some(key) = self.sort else {
            return matching.into_iter().skip(offset).take(limit).collect();
        };

        let mut keyed: Vec<(FieldValue, T)> = matching
            .into_iter()
            .map(|record| {
                let value = record.field_value(key.field.name).unwrap_or(FieldValue::Null);
                (value, record)
            })
            .collect();

        // sort_by is stable: ties keep the order the store produced
        match key.order {
            SortOrder::Asc => keyed.sort_by(|(a, _), (b, _)| a.compare(b)),
            SortOrder::Desc => keyed.sort_by(|(a, _), (b, _)| b.compare(a)),
        }

        keyed
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(|(_, record)| record)
            .collect()
    }
}

/// Entry points of the query engine
pub struct QueryEngine;

impl QueryEngine {
    /// Run a request over an in-memory sequence
    ///
    /// The sequence is not iterated unless the request is valid.
    pub fn execute<T, I>(base: I, request: &QueryRequest) -> Result<Vec<T>, QueryError>
    where
        T: Data,
        I: IntoIterator<Item = T>,
    {
        let compiled = request.compile::<T>()?;
        let page = compiled.apply(base);
        tracing::debug!(entity = T::resource_name(), returned = page.len(), "query executed");
        Ok(page)
    }

    /// Run a request against a store, bounded by `deadline`
    pub async fn execute_store<T, S>(
        store: &S,
        request: &QueryRequest,
        deadline: Deadline,
    ) -> RegistrarResult<Vec<T>>
    where
        T: Data,
        S: QueryableStore<T> + ?Sized,
    {
        let compiled = request.compile::<T>()?;
        let page = deadline.run("scan", store.scan(&compiled)).await??;
        tracing::debug!(entity = T::resource_name(), returned = page.len(), "query executed");
        Ok(page)
    }
}
