use crate::config::NamerConfig;
use crate::error::NamerError;
use crate::extraction::{BBox, OcrEngine, PageContent, TextBlock, TextSource};
use std::io::{Read, Write};
use std::process::{Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};
use tracing::debug;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// OCR backend: renders a page with `pdftoppm` and recognizes it with `tesseract`.
///
/// Tesseract writes TSV, so recognized pages keep one layout block per text
/// line, measured in pixels of the rendered image. Each page gets its own
/// temporary directory, removed on drop. Both subprocesses share the
/// per-page time budget.
pub struct TesseractOcr {
    language: String,
    dpi: u32,
    timeout: Duration,
}

impl TesseractOcr {
    pub fn new(language: impl Into<String>, dpi: u32, timeout: Duration) -> Self {
        TesseractOcr {
            language: language.into(),
            dpi,
            timeout,
        }
    }

    pub fn from_config(config: &NamerConfig) -> Self {
        Self::new(
            config.ocr_language.clone(),
            config.ocr_dpi,
            Duration::from_secs(config.ocr_timeout_secs),
        )
    }

    /// Check if both pdftoppm and tesseract are available on the system.
    pub fn is_available() -> bool {
        let responds = |tool: &str, flag: &str| {
            Command::new(tool)
                .arg(flag)
                .output()
                .map(|o| o.status.success() || !o.stderr.is_empty())
                .unwrap_or(false)
        };
        responds("pdftoppm", "-v") && responds("tesseract", "--version")
    }

    fn run(&self, command: &mut Command, page: usize, deadline: Instant) -> Result<(), NamerError> {
        let tool = command.get_program().to_string_lossy().into_owned();
        let (status, stderr) = run_until(command, deadline).map_err(|e| match e {
            RunError::NotFound => NamerError::OcrToolNotFound {
                tool: tool.clone(),
                language: self.language.clone(),
            },
            RunError::TimedOut => NamerError::OcrTimeout {
                page,
                seconds: self.timeout.as_secs(),
            },
            RunError::Io(e) => NamerError::OcrFailed {
                page,
                reason: format!("{tool}: {e}"),
            },
        })?;

        if !status.success() {
            return Err(NamerError::OcrFailed {
                page,
                reason: format!(
                    "{} exited with code {}: {}",
                    tool,
                    status.code().unwrap_or(-1),
                    stderr.trim()
                ),
            });
        }
        Ok(())
    }
}

impl OcrEngine for TesseractOcr {
    fn recognize_page(&self, pdf_bytes: &[u8], page_number: usize) -> Result<PageContent, NamerError> {
        let deadline = Instant::now() + self.timeout;
        let workdir = tempfile::tempdir()?;

        let pdf_path = workdir.path().join("input.pdf");
        std::fs::File::create(&pdf_path)?.write_all(pdf_bytes)?;

        // -singlefile writes exactly <prefix>.png
        let image_prefix = workdir.path().join("page");
        let page_arg = page_number.to_string();
        self.run(
            Command::new("pdftoppm")
                .arg("-r")
                .arg(self.dpi.to_string())
                .arg("-f")
                .arg(&page_arg)
                .arg("-l")
                .arg(&page_arg)
                .arg("-png")
                .arg("-singlefile")
                .arg(&pdf_path)
                .arg(&image_prefix),
            page_number,
            deadline,
        )?;

        // the tsv config makes tesseract write <base>.tsv
        let tsv_base = workdir.path().join("ocr");
        self.run(
            Command::new("tesseract")
                .arg(image_prefix.with_extension("png"))
                .arg(&tsv_base)
                .arg("-l")
                .arg(&self.language)
                .arg("--dpi")
                .arg(self.dpi.to_string())
                .arg("tsv"),
            page_number,
            deadline,
        )?;

        let tsv = std::fs::read_to_string(tsv_base.with_extension("tsv"))?;
        let page = parse_tsv(&tsv, page_number);
        debug!(
            page = page_number,
            lines = page.blocks.len(),
            "tesseract recognized page"
        );
        Ok(page)
    }

    fn backend_name(&self) -> &str {
        "tesseract"
    }
}

/// Build a page from tesseract TSV output.
///
/// Columns: level, page_num, block_num, par_num, line_num, word_num, left,
/// top, width, height, conf, text. The level 1 row carries the image size;
/// level 5 rows are words, grouped into one block per (block, par, line).
fn parse_tsv(tsv: &str, page_number: usize) -> PageContent {
    let mut page = PageContent {
        page_number,
        source: TextSource::Ocr,
        ..Default::default()
    };
    let mut current: Option<([u32; 3], TextBlock)> = None;

    for row in tsv.lines().skip(1) {
        let fields: Vec<&str> = row.splitn(12, '\t').collect();
        if fields.len() < 10 {
            continue;
        }
        let int = |i: usize| fields[i].trim().parse::<u32>().unwrap_or(0);
        let num = |i: usize| fields[i].trim().parse::<f32>().unwrap_or(0.0);

        match fields[0] {
            "1" => {
                page.width = num(8);
                page.height = num(9);
            }
            "5" => {
                let word = fields.get(11).map_or("", |t| t.trim());
                if word.is_empty() {
                    continue;
                }
                let line = [int(2), int(3), int(4)];
                let bbox = BBox {
                    x_min: num(6),
                    y_min: num(7),
                    x_max: num(6) + num(8),
                    y_max: num(7) + num(9),
                };
                match current.as_mut() {
                    Some((key, block)) if *key == line => {
                        block.text.push(' ');
                        block.text.push_str(word);
                        block.bbox = block.bbox.union(&bbox);
                    }
                    _ => {
                        let next = TextBlock {
                            text: word.to_string(),
                            bbox,
                        };
                        if let Some((_, done)) = current.replace((line, next)) {
                            page.blocks.push(done);
                        }
                    }
                }
            }
            _ => {}
        }
    }
    if let Some((_, done)) = current {
        page.blocks.push(done);
    }

    page.lines = page.blocks.iter().map(|b| b.text.clone()).collect();
    page
}

enum RunError {
    NotFound,
    TimedOut,
    Io(std::io::Error),
}

/// Run a command to completion or kill it once `deadline` passes.
/// Returns the exit status and captured stderr.
///
/// Stderr is drained on its own thread so a chatty tool cannot fill the
/// pipe and stall until the deadline.
fn run_until(command: &mut Command, deadline: Instant) -> Result<(ExitStatus, String), RunError> {
    let mut child = command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                RunError::NotFound
            } else {
                RunError::Io(e)
            }
        })?;

    let stderr_reader = child.stderr.take().map(|mut pipe| {
        std::thread::spawn(move || {
            let mut buf = String::new();
            let _ = pipe.read_to_string(&mut buf);
            buf
        })
    });

    loop {
        if let Some(status) = child.try_wait().map_err(RunError::Io)? {
            let stderr = stderr_reader
                .and_then(|reader| reader.join().ok())
                .unwrap_or_default();
            return Ok((status, stderr));
        }
        if Instant::now() >= deadline {
            let _ = child.kill();
            let _ = child.wait();
            return Err(RunError::TimedOut);
        }
        std::thread::sleep(POLL_INTERVAL);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_tool_is_reported() {
        let ocr = TesseractOcr::new("deu", 300, Duration::from_secs(5));
        let err = ocr
            .run(
                &mut Command::new("pdfnamer-no-such-tool"),
                1,
                Instant::now() + Duration::from_secs(5),
            )
            .unwrap_err();
        assert!(matches!(err, NamerError::OcrToolNotFound { .. }));
    }

    #[test]
    fn test_slow_tool_is_killed_at_deadline() {
        let ocr = TesseractOcr::new("deu", 300, Duration::from_secs(1));
        let started = Instant::now();
        let err = ocr
            .run(
                Command::new("sleep").arg("5"),
                3,
                started + Duration::from_millis(300),
            )
            .unwrap_err();
        assert!(matches!(err, NamerError::OcrTimeout { page: 3, seconds: 1 }));
        assert!(started.elapsed() < Duration::from_secs(4));
    }

    #[test]
    fn test_large_stderr_does_not_stall() {
        let ocr = TesseractOcr::new("deu", 300, Duration::from_secs(10));
        let err = ocr
            .run(
                Command::new("sh")
                    .arg("-c")
                    .arg("head -c 262144 /dev/zero | tr '\\0' x >&2; exit 3"),
                1,
                Instant::now() + Duration::from_secs(10),
            )
            .unwrap_err();
        match err {
            NamerError::OcrFailed { reason, .. } => {
                assert!(reason.starts_with("sh exited with code 3"));
                assert!(reason.len() > 262_144);
            }
            other => panic!("expected OcrFailed, got {other:?}"),
        }
    }

    #[test]
    fn test_tsv_lines_become_blocks() {
        let tsv = "level\tpage_num\tblock_num\tpar_num\tline_num\tword_num\tleft\ttop\twidth\theight\tconf\ttext\n\
            1\t1\t0\t0\t0\t0\t0\t0\t2480\t3508\t-1\t\n\
            2\t1\t1\t0\t0\t0\t200\t120\t900\t60\t-1\t\n\
            5\t1\t1\t1\t1\t1\t200\t120\t300\t60\t95.1\tMondsee\n\
            5\t1\t1\t1\t1\t2\t520\t122\t260\t58\t94.0\tFinanz\n\
            5\t1\t1\t1\t1\t3\t800\t118\t300\t62\t96.3\tGmbH\n\
            5\t1\t2\t1\t1\t1\t250\t900\t120\t50\t-1\t \n\
            5\t1\t2\t1\t1\t2\t250\t900\t280\t50\t91.7\tMax\n\
            5\t1\t2\t1\t1\t3\t550\t900\t500\t50\t92.2\tMustermann\n";

        let page = parse_tsv(tsv, 2);

        assert_eq!(page.page_number, 2);
        assert_eq!(page.source, TextSource::Ocr);
        assert_eq!((page.width, page.height), (2480.0, 3508.0));
        assert!(page.has_layout());
        assert_eq!(page.lines, vec!["Mondsee Finanz GmbH", "Max Mustermann"]);
        assert_eq!(
            page.blocks[0].bbox,
            BBox {
                x_min: 200.0,
                y_min: 118.0,
                x_max: 1100.0,
                y_max: 182.0,
            }
        );
    }

    #[test]
    fn test_tsv_without_words_is_blank() {
        let tsv = "level\tpage_num\tblock_num\tpar_num\tline_num\tword_num\tleft\ttop\twidth\theight\tconf\ttext\n\
            1\t1\t0\t0\t0\t0\t0\t0\t2480\t3508\t-1\t\n";
        let page = parse_tsv(tsv, 1);
        assert!(page.is_blank());
        assert!(!page.has_layout());
    }

    #[test]
    fn test_from_config_uses_profile_values() {
        let config = NamerConfig::default();
        let ocr = TesseractOcr::from_config(&config);
        assert_eq!(ocr.language, "deu");
        assert_eq!(ocr.timeout, Duration::from_secs(config.ocr_timeout_secs));
        assert_eq!(ocr.backend_name(), "tesseract");
    }
}
