//! Element-level verification of declared structural properties

use crate::error::{Error, Result};
use crate::structure::Property;
use crate::traits::{Element, Matrix};
use crate::validation::check_square;

/// Scan `matrix` and report the first element contradicting `property`
pub fn check_property<M: Matrix + ?Sized>(matrix: &M, property: Property) -> Result<()> {
    let (rows, columns) = matrix.dimensions();
    check_square(property, rows, columns)?;

    let zero = <M::Element as Element>::zero();
    let one = <M::Element as Element>::one();
    for i in 0..rows {
        for j in 0..columns {
            let value = matrix.get(i, j);
            let holds = match property {
                Property::Lower => j <= i || value == zero,
                Property::Upper => j >= i || value == zero,
                Property::StrictlyLower => j < i || value == zero,
                Property::StrictlyUpper => j > i || value == zero,
                Property::UniLower if i == j => value == one,
                Property::UniLower => j < i || value == zero,
                Property::UniUpper if i == j => value == one,
                Property::UniUpper => j > i || value == zero,
                Property::Diagonal => i == j || value == zero,
                Property::Symmetric => j <= i || value == matrix.get(j, i),
                Property::Hermitian if i == j => value == value.conj(),
                Property::Hermitian => j <= i || value == matrix.get(j, i).conj(),
            };
            if !holds {
                return Err(Error::PropertyViolation {
                    property,
                    row: i,
                    column: j,
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Grid3;

    #[test]
    fn test_triangular_properties() {
        let lower = Grid3([[1, 0, 0], [2, 1, 0], [3, 4, 1]]);
        assert!(check_property(&lower, Property::Lower).is_ok());
        assert!(check_property(&lower, Property::UniLower).is_ok());
        assert_eq!(
            check_property(&lower, Property::StrictlyLower),
            Err(Error::PropertyViolation {
                property: Property::StrictlyLower,
                row: 0,
                column: 0
            })
        );
        assert_eq!(
            check_property(&lower, Property::Upper),
            Err(Error::PropertyViolation {
                property: Property::Upper,
                row: 1,
                column: 0
            })
        );
    }

    #[test]
    fn test_symmetric_and_diagonal() {
        let sym = Grid3([[1, 2, 3], [2, 5, 6], [3, 6, 9]]);
        assert!(check_property(&sym, Property::Symmetric).is_ok());
        assert!(check_property(&sym, Property::Hermitian).is_ok());
        assert!(check_property(&sym, Property::Diagonal).is_err());

        let skewed = Grid3([[1, 2, 3], [2, 5, 6], [3, 7, 9]]);
        assert_eq!(
            check_property(&skewed, Property::Symmetric),
            Err(Error::PropertyViolation {
                property: Property::Symmetric,
                row: 1,
                column: 2
            })
        );
    }
}
