use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use super::{CommandOutput, CommandRunner, Pacer};
use crate::error::ExecutionError;

/// コマンド文字列で挙動を切り替えるテスト用ランナー
///
/// `hang` は 120 秒待機、`panic` は panic、`launch` は起動失敗、`fail*` は終了コード 1、それ以外は成功。
#[derive(Default)]
pub(crate) struct ScriptedRunner {
    calls: Mutex<Vec<String>>,
}

impl ScriptedRunner {
    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommandRunner for ScriptedRunner {
    async fn run(&self, command: &str) -> Result<CommandOutput, ExecutionError> {
        self.calls.lock().unwrap().push(command.to_string());
        match command {
            "hang" => {
                tokio::time::sleep(Duration::from_secs(120)).await;
                Ok(CommandOutput::default())
            }
            "panic" => panic!("runner exploded"),
            "launch" => Err(ExecutionError::Launch("not found".into())),
            c if c.starts_with("fail") => Ok(CommandOutput {
                code: Some(1),
                stdout: String::new(),
                stderr: "access denied".into(),
            }),
            c => Ok(CommandOutput {
                code: Some(0),
                stdout: format!("{c} done\n"),
                stderr: String::new(),
            }),
        }
    }
}

/// 待たずに回数だけ数える
#[derive(Default)]
pub(crate) struct CountingPacer {
    pauses: AtomicUsize,
}

impl CountingPacer {
    pub(crate) fn pauses(&self) -> usize {
        self.pauses.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Pacer for CountingPacer {
    async fn pause(&self) {
        self.pauses.fetch_add(1, Ordering::SeqCst);
    }
}
