/// Quotes an identifier for MySQL, doubling any embedded backticks.
pub fn quote_identifier(ident: &str) -> String {
    format!("`{}`", ident.replace('`', "``"))
}

/// Quotes each identifier and joins them with `, ` for use in a column list.
pub fn quote_identifier_list(idents: &[String]) -> String {
    idents
        .iter()
        .map(|ident| quote_identifier(ident))
        .collect::<Vec<_>>()
        .join(", ")
}
