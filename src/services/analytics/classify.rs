use crate::services::table::{coerce, Cell, Numeric};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Numeric,
    Categorical,
}

/// A column is numeric iff every non-missing cell coerces to a finite number.
/// A column with only missing cells is vacuously numeric; its statistics are
/// then all-null rather than an error.
pub fn classify(values: &[Cell]) -> ColumnKind {
    for cell in values {
        if matches!(coerce(cell), Numeric::Malformed) {
            return ColumnKind::Categorical;
        }
    }
    ColumnKind::Numeric
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_coercible_values_are_numeric() {
        let values = vec![Cell::text("1.5"), Cell::num(2.0), Cell::text(" 3 ")];
        assert_eq!(classify(&values), ColumnKind::Numeric);
    }

    #[test]
    fn single_malformed_value_makes_column_categorical() {
        let values = vec![Cell::text("1.5"), Cell::text("tank-a"), Cell::num(2.0)];
        assert_eq!(classify(&values), ColumnKind::Categorical);
    }

    #[test]
    fn missing_cells_do_not_affect_classification() {
        let values = vec![Cell::text("1"), Cell::Empty, Cell::text("n/a")];
        assert_eq!(classify(&values), ColumnKind::Numeric);
    }

    #[test]
    fn all_missing_column_is_vacuously_numeric() {
        let values = vec![Cell::Empty, Cell::Empty];
        assert_eq!(classify(&values), ColumnKind::Numeric);
        assert_eq!(classify(&[]), ColumnKind::Numeric);
    }
}
