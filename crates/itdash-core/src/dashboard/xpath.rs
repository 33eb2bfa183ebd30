//! XPath locators for the itdashboard.gov markup.

/// "Dive In" button on the landing page.
pub const DIVE_IN: &str = r#"//*[@id="node-23"]/div/div/div/div/div/div/div/a"#;

/// One tile per agency.
pub const AGENCY_CONTAINER: &str = r#"//div[@class="col-sm-4 text-center noUnderline"]"#;

/// Relative to a tile: the amount span, then the agency name span.
pub const AGENCY_TILE_SPANS: &str = "./div/div/div/div/a/span";

/// Every tile span across the page, amounts and names interleaved.
pub const AGENCY_SPANS: &str =
    r#"//div[@class="col-sm-4 text-center noUnderline"]/div/div/div/div/a/span"#;

pub const PAGE_LENGTH_SELECT: &str = r#"//select[@name="investments-table-object_length"]"#;

/// "All" entry of the investments table page-length selector.
pub const SHOW_ALL_ROWS: &str =
    r#"//select[@name="investments-table-object_length"]/option[text()="All"]"#;

pub const TABLE_HEADERS: &str = r#"//div[@class="dataTables_scrollHeadInner"]/table/thead/tr/th"#;

pub const TABLE_CELLS: &str = r#"//div[@class="dataTables_scrollBody"]/table/tbody/tr/td"#;

/// DataTables summary under the table ("Showing 1 to 10 of 57 entries").
pub const TABLE_INFO: &str = r#"//div[@id="investments-table-object_info"]"#;

/// UII links in the first column of the investments table.
pub const DETAIL_LINKS: &str = r#"//div[@class="dataTables_scrollBody"]/table/tbody/tr/td/a"#;

/// "Download Business Case PDF" link on an investment page.
pub const BUSINESS_CASE_LINK: &str = r#"//div[@id="business-case-pdf"]/a"#;

/// Indicator shown next to the link while the PDF is generated.
pub const BUSINESS_CASE_INDICATOR: &str = r#"//div[@id="business-case-pdf"]/span"#;
