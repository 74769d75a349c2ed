/// A tokenized command line: the argument tokens plus any per-token
/// expansion diagnostics. A diagnostic never aborts the whole line; the
/// remaining tokens still form a runnable command.
#[derive(Debug, Default, PartialEq)]
pub struct Tokenized {
    pub tokens: Vec<String>,
    pub warnings: Vec<String>,
}

/// Split a raw line on whitespace and expand glob tokens in place.
/// A token containing `*` or `?` is replaced by its filesystem matches,
/// preserving order; zero matches drops the token with a warning.
pub fn tokenize(line: &str) -> Tokenized {
    let mut out = Tokenized::default();

    for token in line.split_whitespace() {
        if token.contains(['*', '?']) {
            expand_glob(token, &mut out);
        } else {
            out.tokens.push(token.to_string());
        }
    }

    out
}

fn expand_glob(pattern: &str, out: &mut Tokenized) {
    match glob::glob(pattern) {
        Ok(paths) => {
            let matches: Vec<String> = paths
                .filter_map(Result::ok)
                .map(|path| path.display().to_string())
                .collect();
            if matches.is_empty() {
                out.warnings
                    .push(format!("{}: no match", pattern));
            } else {
                out.tokens.extend(matches);
            }
        }
        Err(e) => {
            out.warnings.push(format!("{}: {}", pattern, e.msg));
        }
    }
}
