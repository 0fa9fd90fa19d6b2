//! Code-block syntax highlighting through an external highlighter process.
//!
//! The highlighter is a pygmentize-compatible command line tool: it reads
//! code on stdin and prints an HTML fragment without wrapping markup on
//! stdout. A failing or slow highlighter never fails the build; the block
//! falls back to unhighlighted output.
use std::io::{Read, Write};
use std::process::{Child, Command, Stdio};
use std::sync::mpsc;
use std::thread;

use log::warn;

use super::markdown::{FragmentKind, Modifier, escape_html};
use crate::config::HighlightOptions;
use crate::errors::HighlightError;

/// Language tag that opts a fenced block out of highlighting.
pub const NO_HIGHLIGHT: &str = "no-highlight";

pub(crate) struct CodeFence<'a> {
    pub language: Option<&'a str>,
    pub code: &'a str,
}

/// Splits the source of a fenced code block into its language tag and inner
/// code. `source` is the exact block source, fence lines included. Indented
/// blocks carry no fence and come back with no language and the source as-is.
pub(crate) fn parse_fence(source: &str) -> CodeFence<'_> {
    let Some(rest) = source
        .strip_prefix("```")
        .or_else(|| source.strip_prefix("~~~"))
    else {
        return CodeFence {
            language: None,
            code: source,
        };
    };

    let (first_line, body) = rest.split_once('\n').unwrap_or((rest, ""));
    let language = first_line.trim();
    let language = (!language.is_empty()).then_some(language);

    let body = body.trim_end();
    let code = body
        .strip_suffix("```")
        .or_else(|| body.strip_suffix("~~~"))
        .unwrap_or(body);
    let code = code.strip_suffix('\n').unwrap_or(code);

    CodeFence { language, code }
}

/// Builds the code-block [`Modifier`] that pipes fenced code through the
/// configured external highlighter.
///
/// Blocks tagged [`NO_HIGHLIGHT`] and blocks without a language tag pass
/// through unhighlighted; no default language is guessed. Every failure of
/// the external call (spawn, non-zero exit, I/O, timeout) logs a warning and
/// falls back to the escaped, unhighlighted code in the same
/// `<pre><code>` structure.
pub fn highlight_modifier(options: HighlightOptions) -> Modifier {
    Modifier::new("highlight", FragmentKind::CodeBlock, move |html, source| {
        let fence = parse_fence(source);

        let Some(language) = fence.language else {
            return html.to_string();
        };
        if language == NO_HIGHLIGHT {
            return html.to_string();
        }

        match run_highlighter(&options, language, fence.code) {
            Ok(highlighted) => {
                format!("<pre><code>{}</code></pre>", highlighted.trim_end())
            }
            Err(err) => {
                warn!(target: "highlight", "{err}; emitting the block unhighlighted");
                format!("<pre><code>{}</code></pre>", escape_html(fence.code))
            }
        }
    })
}

fn run_highlighter(
    options: &HighlightOptions,
    language: &str,
    code: &str,
) -> Result<String, HighlightError> {
    let command = options.command.to_string_lossy().into_owned();

    let mut child = Command::new(&options.command)
        .args(["-l", language, "-f", "html", "-O", "nowrap"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| HighlightError::Spawn {
            command: command.clone(),
            source,
        })?;

    // Write the code and close stdin so the highlighter sees EOF.
    let mut stdin = child.stdin.take().expect("stdin was piped");
    if let Err(source) = stdin.write_all(code.as_bytes()) {
        reap(&mut child);
        return Err(HighlightError::Io { command, source });
    }
    drop(stdin);

    // Read stdout on a separate thread so a stuck highlighter can be timed
    // out without deadlocking on a full pipe.
    let mut stdout = child.stdout.take().expect("stdout was piped");
    let (sender, receiver) = mpsc::channel();
    thread::spawn(move || {
        let mut output = String::new();
        let result = stdout.read_to_string(&mut output).map(|_| output);
        let _ = sender.send(result);
    });

    let output = match receiver.recv_timeout(options.timeout) {
        Ok(Ok(output)) => output,
        Ok(Err(source)) => {
            reap(&mut child);
            return Err(HighlightError::Io { command, source });
        }
        Err(_) => {
            reap(&mut child);
            return Err(HighlightError::Timeout {
                command,
                timeout: options.timeout,
            });
        }
    };

    let status = child
        .wait()
        .map_err(|source| HighlightError::Io {
            command: command.clone(),
            source,
        })?;

    if !status.success() {
        let mut stderr = String::new();
        if let Some(mut pipe) = child.stderr.take() {
            let _ = pipe.read_to_string(&mut stderr);
        }
        return Err(HighlightError::Failed {
            command,
            status,
            stderr: stderr.trim().to_string(),
        });
    }

    Ok(output)
}

fn reap(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}
