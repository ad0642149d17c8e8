//! immich 上传服务 - 业务能力层
//!
//! 只负责"上传一个批次"：启动外部 `immich upload` 进程，
//! 同时转发它的 stdout / stderr，等待退出并返回结果。

use crate::error::UploadError;
use crate::models::UploadOutcome;
use std::ffi::OsString;
use std::future::Future;
use std::io;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::process::Command;
use tracing::debug;

/// 批次上传能力
///
/// 编排层只依赖这个 trait，测试里可以替换成记录调用的假实现
pub trait BatchUploader {
    /// 上传一个批次
    ///
    /// 非零退出码返回 `Ok(UploadOutcome { success: false, .. })`，
    /// 只有进程无法启动等情况才返回 `Err`
    fn upload_batch(
        &self,
        files: &[PathBuf],
        album: &str,
    ) -> impl Future<Output = Result<UploadOutcome, UploadError>>;
}

/// 调用外部 immich CLI 的上传器
#[derive(Debug, Clone)]
pub struct ImmichUploader {
    program: String,
    leading_args: Vec<String>,
}

impl ImmichUploader {
    /// 创建上传器
    ///
    /// # 参数
    /// - `command_line`: 上传程序，可以带固定前缀参数，如 `npx @immich/cli`
    pub fn new(command_line: &str) -> Self {
        let mut parts = command_line.split_whitespace().map(str::to_string);
        let program = parts.next().unwrap_or_else(|| "immich".to_string());
        Self {
            program,
            leading_args: parts.collect(),
        }
    }

    /// 使用显式的程序和前缀参数创建
    pub fn with_args(program: impl Into<String>, leading_args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            leading_args,
        }
    }

    /// 完整参数：`<前缀参数> upload <文件...> --album <相册名>`
    pub fn command_args(&self, files: &[PathBuf], album: &str) -> Vec<OsString> {
        let mut args: Vec<OsString> = self.leading_args.iter().map(OsString::from).collect();
        args.push("upload".into());
        args.extend(files.iter().map(|f| f.as_os_str().to_os_string()));
        args.push("--album".into());
        args.push(album.into());
        args
    }

    /// 上传一个批次，输出转发到给定的 writer
    ///
    /// # 参数
    /// - `files`: 本批文件
    /// - `album`: 相册名
    /// - `out`: 子进程 stdout 的转发目标
    /// - `err`: 子进程 stderr 的转发目标，失败诊断也写在这里
    ///
    /// # 返回
    /// 两路输出都转发完毕且进程退出后返回结果
    pub async fn run<O, E>(
        &self,
        files: &[PathBuf],
        album: &str,
        out: O,
        err: E,
    ) -> Result<UploadOutcome, UploadError>
    where
        O: AsyncWrite + Unpin + Send + 'static,
        E: AsyncWrite + Unpin + Send + 'static,
    {
        debug!(
            "执行: {} upload <{} 个文件> --album {}",
            self.program,
            files.len(),
            album
        );

        let mut child = Command::new(&self.program)
            .args(self.command_args(files, album))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| UploadError::SpawnFailed {
                program: self.program.clone(),
                source,
            })?;

        let child_out = child.stdout.take();
        let child_err = child.stderr.take();

        let out_task = tokio::spawn(async move {
            match child_out {
                Some(pipe) => stream_pipe(pipe, out).await,
                None => Ok(out),
            }
        });
        let err_task = tokio::spawn(async move {
            match child_err {
                Some(pipe) => stream_pipe(pipe, err).await,
                None => Ok(err),
            }
        });

        let (out_res, err_res) = futures::future::join(out_task, err_task).await;
        let status = child.wait().await.map_err(UploadError::WaitFailed)?;

        out_res?.map_err(|source| UploadError::StreamFailed {
            stream: "stdout",
            source,
        })?;
        let mut err = err_res?.map_err(|source| UploadError::StreamFailed {
            stream: "stderr",
            source,
        })?;

        let outcome = UploadOutcome::from_exit_code(status.code());
        if !outcome.success {
            let diagnostic = match outcome.exit_code {
                Some(code) => format!("ERROR: immich upload exited with code {}\n", code),
                None => "ERROR: immich upload was terminated by a signal\n".to_string(),
            };
            let _ = err.write_all(diagnostic.as_bytes()).await;
            let _ = err.flush().await;
        }

        Ok(outcome)
    }
}

impl BatchUploader for ImmichUploader {
    async fn upload_batch(&self, files: &[PathBuf], album: &str) -> Result<UploadOutcome, UploadError> {
        self.run(files, album, tokio::io::stdout(), tokio::io::stderr()).await
    }
}

/// 逐行转发，每行写完立即 flush
///
/// 按字节读取，非 UTF-8 输出原样转发。返回 writer 以便调用方继续使用
pub async fn stream_pipe<R, W>(reader: R, mut writer: W) -> io::Result<W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut reader = BufReader::new(reader);
    let mut line = Vec::new();

    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line).await? == 0 {
            break;
        }
        writer.write_all(&line).await?;
        writer.flush().await?;
    }

    Ok(writer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_args_layout() {
        let uploader = ImmichUploader::new("npx @immich/cli");
        let args = uploader.command_args(&[PathBuf::from("a.jpg"), PathBuf::from("b c.jpg")], "My Album");
        let args: Vec<_> = args.iter().map(|a| a.to_string_lossy().into_owned()).collect();

        assert_eq!(uploader.program, "npx");
        assert_eq!(
            args,
            vec!["@immich/cli", "upload", "a.jpg", "b c.jpg", "--album", "My Album"]
        );
    }

    #[test]
    fn test_empty_command_line_falls_back_to_immich() {
        let uploader = ImmichUploader::new("   ");
        assert_eq!(uploader.program, "immich");
        assert!(uploader.leading_args.is_empty());
    }

    #[tokio::test]
    async fn test_stream_pipe_copies_all_lines() {
        let input: &[u8] = b"line 1\nline 2\nno newline at end";
        let out = stream_pipe(input, Vec::new()).await.unwrap();
        assert_eq!(out, input.to_vec());
    }

    #[tokio::test]
    async fn test_stream_pipe_passes_non_utf8() {
        let input: &[u8] = &[0xff, 0xfe, b'\n', b'o', b'k', b'\n'];
        let out = stream_pipe(input, Vec::new()).await.unwrap();
        assert_eq!(out, input.to_vec());
    }

    /// 用 `sh -c` 充当上传程序：`$0` 为 immich，`$@` 为 upload 及其参数
    #[cfg(unix)]
    fn fake_immich(script: &str) -> ImmichUploader {
        ImmichUploader::with_args(
            "sh",
            vec!["-c".to_string(), script.to_string(), "immich".to_string()],
        )
    }

    #[cfg(unix)]
    async fn read_all(mut reader: tokio::io::DuplexStream) -> String {
        use tokio::io::AsyncReadExt;
        let mut text = String::new();
        reader.read_to_string(&mut text).await.unwrap();
        text
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_success_forwards_both_streams() {
        let uploader = fake_immich(r#"echo "args: $*"; echo "progress" >&2; exit 0"#);
        let files = vec![PathBuf::from("x.jpg"), PathBuf::from("y.jpg")];

        let (out_w, out_r) = tokio::io::duplex(64 * 1024);
        let (err_w, err_r) = tokio::io::duplex(64 * 1024);
        let outcome = uploader.run(&files, "Summer", out_w, err_w).await.unwrap();

        assert!(outcome.success);
        assert_eq!(outcome.exit_code, Some(0));
        assert_eq!(read_all(out_r).await, "args: upload x.jpg y.jpg --album Summer\n");
        assert_eq!(read_all(err_r).await, "progress\n");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_failure_reports_exit_code() {
        let uploader = fake_immich("echo boom >&2; exit 3");

        let (out_w, out_r) = tokio::io::duplex(64 * 1024);
        let (err_w, err_r) = tokio::io::duplex(64 * 1024);
        let outcome = uploader
            .run(&[PathBuf::from("x.jpg")], "A", out_w, err_w)
            .await
            .unwrap();

        assert_eq!(
            outcome,
            UploadOutcome {
                success: false,
                exit_code: Some(3),
            }
        );
        assert_eq!(read_all(out_r).await, "");
        assert_eq!(
            read_all(err_r).await,
            "boom\nERROR: immich upload exited with code 3\n"
        );
    }

    /// stderr 先写满远超管道缓冲的数据，再写 stdout：只有两路同时读取才不会卡住
    #[cfg(unix)]
    #[tokio::test]
    async fn test_large_stderr_does_not_block_stdout() {
        use std::time::Duration;

        let uploader = fake_immich("head -c 300000 /dev/zero | tr '\\0' e >&2; echo done");

        let (out_w, out_r) = tokio::io::duplex(64 * 1024);
        let (err_w, err_r) = tokio::io::duplex(8 * 1024);
        let err_reader = tokio::spawn(read_all(err_r));

        let outcome = tokio::time::timeout(
            Duration::from_secs(10),
            uploader.run(&[PathBuf::from("x.jpg")], "A", out_w, err_w),
        )
        .await
        .expect("上传进程的输出转发卡住了")
        .unwrap();

        assert!(outcome.success);
        assert_eq!(read_all(out_r).await, "done\n");
        let err_text = err_reader.await.unwrap();
        assert_eq!(err_text.len(), 300_000);
        assert!(err_text.bytes().all(|b| b == b'e'));
    }

    /// 进程还在运行时，已输出的行就应该到达 writer
    #[cfg(unix)]
    #[tokio::test]
    async fn test_stdout_line_arrives_before_exit() {
        let uploader = fake_immich("echo first; sleep 1; echo second");

        let files = vec![PathBuf::from("x.jpg")];

        let (out_w, out_r) = tokio::io::duplex(1024);
        let mut lines = BufReader::new(out_r).lines();

        let run = uploader.run(&files, "A", out_w, tokio::io::sink());
        tokio::pin!(run);

        let first = tokio::select! {
            line = lines.next_line() => line.unwrap(),
            _ = &mut run => panic!("进程退出前没有转发任何输出"),
        };
        assert_eq!(first.as_deref(), Some("first"));

        let outcome = run.await.unwrap();
        assert!(outcome.success);
        assert_eq!(lines.next_line().await.unwrap().as_deref(), Some("second"));
        assert_eq!(lines.next_line().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_missing_program_is_spawn_error() {
        let uploader = ImmichUploader::new("definitely-not-an-immich-binary-8c1f");
        let err = uploader
            .run(&[PathBuf::from("x.jpg")], "A", Vec::new(), Vec::new())
            .await
            .unwrap_err();
        assert!(matches!(err, UploadError::SpawnFailed { .. }));
    }
}
