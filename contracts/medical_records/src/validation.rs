extern crate alloc;

use alloc::string::String as StdString;

use crate::store::StoreError;

/// Check that exactly `N` arguments were supplied and hand them back as an
/// array so callers can destructure them.
pub fn expect_args<const N: usize>(args: &[StdString]) -> Result<&[StdString; N], StoreError> {
    args.try_into()
        .map_err(|_| StoreError::ArgumentCount { expected: N })
}
