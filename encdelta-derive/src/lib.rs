mod table_row;

use proc_macro::TokenStream;

/// Binds a plain struct to the metadata table it is a row of.
///
/// ```ignore
/// #[derive(TableRow)]
/// #[table(MethodDef)]
/// pub struct MethodDefRow { .. }
/// ```
///
/// generates `impl TableRow for MethodDefRow { const KIND: TableKind = TableKind::MethodDef; }`.
#[proc_macro_derive(TableRow, attributes(table))]
pub fn derive_table_row(input: TokenStream) -> TokenStream {
    table_row::derive(input).into()
}
