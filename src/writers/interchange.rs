use crate::error::Result;
use crate::models::MergedRow;
use std::io::Write;

/// Write rows in the interchange format, one per line. Returns the number of
/// rows written.
pub fn write_merged_rows<'r, W, I>(writer: &mut W, rows: I) -> Result<usize>
where
    W: Write,
    I: IntoIterator<Item = &'r MergedRow>,
{
    let mut count = 0;
    for row in rows {
        writeln!(writer, "{}", row)?;
        count += 1;
    }
    writer.flush()?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::readers::RowReader;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    #[test]
    fn test_written_rows_are_readable() {
        let input = "2015_02_03 09:02:34 38.86 30.07 3.00\n2015_02_03 09:07:34 39.00 29.91 5.00\n";
        let rows: Vec<MergedRow> = RowReader::new(Cursor::new(input))
            .collect::<Result<_>>()
            .unwrap();

        let mut output = Vec::new();
        let count = write_merged_rows(&mut output, &rows).unwrap();

        assert_eq!(count, 2);
        assert_eq!(String::from_utf8(output).unwrap(), input);
    }
}
