/// Tests for console formatting module
///
/// These tests ensure console output formatting remains stable.
/// Every table test uses an explicit width so the terminal running
/// the tests doesn't change the output.

#[cfg(test)]
mod tests {
    use crate::console_format::*;
    use crate::filter::FilterHandle;
    use crate::types::*;

    fn header(labels: &[&str]) -> Vec<HeaderCell> {
        labels.iter().map(|l| HeaderCell { label: l.to_string(), key: l.to_lowercase() }).collect()
    }

    fn product_table() -> TableView {
        TableView {
            title: "Products (2 items)".to_string(),
            action: None,
            filter: None,
            header: header(&["ID", "Name", "Price"]),
            rows: vec![
                Row {
                    cells: vec![
                        Cell { text: "1".to_string(), class: Some(CellClass::Number) },
                        Cell::plain("Widget"),
                        Cell { text: "$9.99".to_string(), class: Some(CellClass::Price) },
                    ],
                    low_stock: false,
                    class: None,
                },
                Row {
                    cells: vec![
                        Cell { text: "2".to_string(), class: Some(CellClass::Number) },
                        Cell::plain("Gadget"),
                        Cell { text: "$12.00".to_string(), class: Some(CellClass::Price) },
                    ],
                    low_stock: true,
                    class: Some(RowClass::LowStock),
                },
            ],
        }
    }

    #[test]
    fn test_display_width_ascii() {
        assert_eq!(display_width("hello"), 5);
        assert_eq!(display_width(""), 0);
        assert_eq!(display_width("$1,234.50"), 9);
    }

    #[test]
    fn test_display_width_unicode() {
        // Unicode box drawing characters
        assert_eq!(display_width("│"), 1);
        assert_eq!(display_width("─"), 1);
        // Wide characters
        assert_eq!(display_width("📦"), 2);
        assert_eq!(display_width("日本"), 4);
    }

    #[test]
    fn test_truncate_with_padding_needs_padding() {
        let result = truncate_with_padding("hi", 5);
        assert_eq!(result, "hi   ");
        assert_eq!(display_width(&result), 5);
    }

    #[test]
    fn test_truncate_with_padding_needs_truncation() {
        let result = truncate_with_padding("hello world", 8);
        assert_eq!(result, "hello...");
        assert_eq!(display_width(&result), 8);
    }

    #[test]
    fn test_truncate_with_padding_unicode() {
        let result = truncate_with_padding("test 📦 box", 10);
        assert_eq!(display_width(&result), 10);
        assert!(result.ends_with("..."));
    }

    #[test]
    fn test_pad_left() {
        assert_eq!(pad_left("$9.99", 8), "   $9.99");
        assert_eq!(pad_left("123456789", 6), "123...");
    }

    #[test]
    fn test_table_layout() {
        let view = ViewModel::Table(product_table());
        let output = format_view(&view, None, 80);
        let expected = "\
Products (2 items)
┌────┬────────┬────────┐
│ ID │  Name  │ Price  │
├────┼────────┼────────┤
│  1 │ Widget │  $9.99 │
│  2 │ Gadget │ $12.00 │
└────┴────────┴────────┘
";
        assert_eq!(output, expected);
    }

    #[test]
    fn test_widths_shrink_to_console() {
        let rows = vec![Row { cells: vec![Cell::plain("x".repeat(50))], low_stock: false, class: None }];
        let widths = fit_column_widths(&header(&["Description"]), &rows, 30);
        // 30 minus two padding spaces and two borders
        assert_eq!(widths, vec![26]);

        let rows = vec![Row { cells: vec![Cell::plain("abc"), Cell::plain("def")], low_stock: false, class: None }];
        let widths = fit_column_widths(&header(&["A", "B"]), &rows, 80);
        assert_eq!(widths, vec![3, 3]);
    }

    #[test]
    fn test_widths_never_below_minimum() {
        let rows = vec![Row { cells: vec![Cell::plain("long value here")], low_stock: false, class: None }];
        let widths = fit_column_widths(&header(&["Name"]), &rows, 4);
        assert_eq!(widths, vec![5]);
    }

    #[test]
    fn test_colors_for_low_stock_and_expired() {
        let mut table = product_table();
        table.rows[0].cells[2] = Cell { text: "1/1/2000".to_string(), class: Some(CellClass::Expired) };

        let mut writer = TableWriter::with_width(Vec::new(), true, 80);
        writer.write_table(&table, None).unwrap();
        let output = String::from_utf8(writer.into_inner()).unwrap();

        // Bright red for the expired cell, bright yellow for the low-stock row
        assert!(output.contains("\x1b[91m1/1/2000\x1b[0m"));
        assert!(output.contains("\x1b[93mGadget\x1b[0m"));
    }

    #[test]
    fn test_no_escape_codes_without_colors() {
        let output = format_view(&ViewModel::Table(product_table()), None, 80);
        assert!(!output.contains('\x1b'));
    }

    #[test]
    fn test_action_and_filter_lines() {
        let mut table = product_table();
        table.action = Some(ActionControl { label: "Add Product".to_string(), target: "/add_product.html".to_string() });
        table.filter = Some(FilterInput { placeholder: "Search...".to_string() });

        let mut handle = FilterHandle::new(&table.rows);
        handle.apply("gadg");
        let output = format_view(&ViewModel::Table(table), Some(&handle), 80);

        assert!(output.contains("[ Add Product ] -> /add_product.html"));
        assert!(output.contains("Search... \"gadg\" (showing 1 of 2)"));
        assert!(output.contains("Gadget"));
        assert!(!output.contains("Widget"));
    }

    #[test]
    fn test_empty_view_box() {
        let output = format_view(&ViewModel::empty("Vendors"), None, 80);
        let expected = "\
┌───────────────────┐
│ Vendors           │
├───────────────────┤
│ No data available │
└───────────────────┘
";
        assert_eq!(output, expected);
    }

    #[test]
    fn test_error_view_shows_details() {
        let output = format_view(&ViewModel::error("connection refused"), None, 80);
        assert!(output.contains(ERROR_TITLE));
        assert!(output.contains(ERROR_MESSAGE));
        assert!(output.contains("Error details: connection refused"));
    }
}
