//! crates/logging/src/format.rs
//! Level-selected error rendering.

use std::error::Error;
use std::fmt;

/// How an error value is rendered for display.
///
/// [`Level::error_format`](crate::Level::error_format) selects the variant,
/// so the mapping from level to rendering is total.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorFormat {
    /// The error's own top-level description.
    Concise,
    /// The top-level description followed by every error in its source chain.
    Detailed,
}

impl ErrorFormat {
    /// Returns `true` for [`ErrorFormat::Detailed`].
    #[must_use]
    pub const fn is_detailed(self) -> bool {
        matches!(self, Self::Detailed)
    }

    /// Renders `error` into a new string.
    ///
    /// The detailed form always begins with the concise form, so switching
    /// rendering only ever appends information.
    ///
    /// # Examples
    ///
    /// ```
    /// use logging::ErrorFormat;
    /// use std::io;
    ///
    /// let error = io::Error::other("disk full");
    /// assert_eq!(ErrorFormat::Concise.render(&error), "disk full");
    /// assert_eq!(ErrorFormat::Detailed.render(&error), "disk full");
    /// ```
    #[must_use]
    pub fn render(self, error: &(dyn Error + 'static)) -> String {
        let mut rendered = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_chain(&mut rendered, error);
        rendered
    }

    /// Writes `error` to `out` using this rendering.
    pub fn write_chain<W>(self, out: &mut W, error: &(dyn Error + 'static)) -> fmt::Result
    where
        W: fmt::Write + ?Sized,
    {
        write!(out, "{error}")?;
        if self.is_detailed() {
            let mut source = error.source();
            while let Some(cause) = source {
                write!(out, "\n  caused by: {cause}")?;
                source = cause.source();
            }
        }
        Ok(())
    }
}
