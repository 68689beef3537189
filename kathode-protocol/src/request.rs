//! HTTP request-line parsing
//!
//! Only the first line of the request matters; headers and body are
//! ignored. The path selects a function or variable name and an optional
//! `params=` query carries the single argument.

/// A parsed request line: the bare name plus its optional argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Request<'a> {
    pub name: &'a str,
    pub arg: Option<&'a str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RequestError {
    /// Blank line, or nothing after the method.
    Empty,
    /// The path did not name anything.
    BadPath,
}

/// Parse the first line of a request.
///
/// Accepts both a full HTTP request line (`GET /name?params=x HTTP/1.1`)
/// and a bare path, which is convenient for line-oriented testing.
pub fn parse_request(line: &str) -> Result<Request<'_>, RequestError> {
    let line = line.trim();
    let line = line.strip_prefix("GET ").unwrap_or(line);
    let target = line.split_whitespace().next().ok_or(RequestError::Empty)?;

    let path = target.strip_prefix('/').unwrap_or(target);
    let (name, arg) = match path.split_once('?') {
        Some((name, query)) => {
            let arg = query.strip_prefix("params=").filter(|a| !a.is_empty());
            (name, arg)
        }
        None => (path, None),
    };

    if name.is_empty() {
        return Err(RequestError::BadPath);
    }
    Ok(Request { name, arg })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_request_line_with_argument() {
        let req = parse_request("GET /setBrightness?params=50 HTTP/1.1\r\n").unwrap();
        assert_eq!(req.name, "setBrightness");
        assert_eq!(req.arg, Some("50"));
    }

    #[test]
    fn variable_read_has_no_argument() {
        let req = parse_request("GET /brightness HTTP/1.1").unwrap();
        assert_eq!(req.name, "brightness");
        assert_eq!(req.arg, None);
    }

    #[test]
    fn bare_path_is_accepted() {
        let req = parse_request("/setDisplay?params=off").unwrap();
        assert_eq!(req.name, "setDisplay");
        assert_eq!(req.arg, Some("off"));
    }

    #[test]
    fn empty_argument_is_dropped() {
        let req = parse_request("GET /setBrightness?params= HTTP/1.1").unwrap();
        assert_eq!(req.arg, None);
        let req = parse_request("GET /restart?cached=no HTTP/1.1").unwrap();
        assert_eq!(req.name, "restart");
        assert_eq!(req.arg, None);
    }

    #[test]
    fn blank_and_bad_lines() {
        assert_eq!(parse_request(""), Err(RequestError::Empty));
        assert_eq!(parse_request("   "), Err(RequestError::Empty));
        assert_eq!(parse_request("GET / HTTP/1.1"), Err(RequestError::BadPath));
        assert_eq!(parse_request("/?params=1"), Err(RequestError::BadPath));
    }
}
