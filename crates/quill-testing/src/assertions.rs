//! Line-level assertions over captured log output.

use anyhow::Result;

/// Assert the captured messages are exactly `expected`, in order.
pub fn assert_messages(actual: &[String], expected: &[&str]) -> Result<()> {
    if actual.len() != expected.len() {
        anyhow::bail!(
            "Expected {} messages, got {}: {:?}",
            expected.len(),
            actual.len(),
            actual
        );
    }
    for (i, (got, want)) in actual.iter().zip(expected.iter()).enumerate() {
        if got != want {
            anyhow::bail!("Message {} was {:?}, expected {:?}", i, got, want);
        }
    }
    Ok(())
}

/// Assert every captured line ends with a single trailing newline.
pub fn assert_newline_terminated(lines: &[String]) -> Result<()> {
    for (i, line) in lines.iter().enumerate() {
        if !line.ends_with('\n') {
            anyhow::bail!("Line {} is not newline-terminated: {:?}", i, line);
        }
        if line.ends_with("\n\n") {
            anyhow::bail!("Line {} has a doubled newline: {:?}", i, line);
        }
    }
    Ok(())
}
