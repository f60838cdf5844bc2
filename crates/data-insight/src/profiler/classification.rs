//! Column classification.

use crate::types::ColumnClassification;
use crate::utils::{DtypeCategory, get_dtype_category, is_date_like_name};
use polars::prelude::*;

/// Split the columns of `df` into numeric, categorical and date-like sets.
///
/// Any column whose name contains `date_keyword` is date-like, whatever its
/// values. Integer/float columns are numeric, named like dates or not. Text
/// columns and temporal columns that are not named like dates are
/// categorical. Booleans land in no set.
///
/// Only names and dtypes are consulted, so running this on the dataset after
/// date coercion gives the same result as before.
pub(crate) fn classify_columns(df: &DataFrame, date_keyword: &str) -> ColumnClassification {
    let mut classification = ColumnClassification::default();

    for col in df.get_columns() {
        let name = col.name().to_string();

        let category = get_dtype_category(col.dtype());

        if is_date_like_name(&name, date_keyword) {
            if category == DtypeCategory::Numeric {
                classification.numeric.push(name.clone());
            }
            classification.date_like.push(name);
            continue;
        }

        match category {
            DtypeCategory::Numeric => classification.numeric.push(name),
            DtypeCategory::Text | DtypeCategory::Temporal => classification.categorical.push(name),
            DtypeCategory::Boolean | DtypeCategory::Other => {}
        }
    }

    classification
}
