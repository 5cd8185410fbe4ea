#![allow(dead_code)]

use async_trait::async_trait;
use pyexplorer_bootstrap::{BootstrapConfig, CommandOutput, CommandRunner, CommandSpec, Result};
use std::path::Path;
use std::sync::Mutex;

pub const DPKG_HEADER: &str = "\
Desired=Unknown/Install/Remove/Purge/Hold
| Status=Not/Inst/Conf-files/Unpacked/halF-conf/Half-inst/trig-aWait/Trig-pend
||/ Name           Version      Architecture Description
+++-==============-============-============-=================================
";

type Handler = Box<dyn Fn(&CommandSpec) -> Result<CommandOutput> + Send + Sync>;

/// Records every command and answers through a handler instead of spawning.
pub struct RecordingRunner {
    calls: Mutex<Vec<CommandSpec>>,
    handler: Handler,
}

pub fn ok(stdout: &str) -> Result<CommandOutput> {
    Ok(CommandOutput {
        status: Some(0),
        stdout: stdout.to_string(),
        stderr: String::new(),
    })
}

pub fn exit(code: i32) -> Result<CommandOutput> {
    Ok(CommandOutput {
        status: Some(code),
        ..Default::default()
    })
}

pub fn dpkg_listing(installed: &[&str]) -> String {
    let mut out = DPKG_HEADER.to_string();
    for name in installed {
        out.push_str(&format!("ii  {:<14} 1.0          amd64        test package\n", name));
    }
    out
}

pub fn program_name(spec: &CommandSpec) -> String {
    spec.program
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

pub fn is_query(spec: &CommandSpec) -> bool {
    program_name(spec) == "dpkg"
}

pub fn is_install(spec: &CommandSpec) -> bool {
    program_name(spec) == "sudo" || program_name(spec) == "apt"
}

pub fn is_venv_create(spec: &CommandSpec) -> bool {
    spec.args.len() >= 2 && spec.args[0] == "-m" && spec.args[1] == "venv"
}

pub fn is_pip(spec: &CommandSpec) -> bool {
    spec.args.len() >= 2 && spec.args[0] == "-m" && spec.args[1] == "pip"
}

pub fn is_launch(spec: &CommandSpec) -> bool {
    spec.args == ["main.py"]
}

/// Mimics `python -m venv <dir>` by creating the directory layout.
pub fn create_venv_dir(spec: &CommandSpec) {
    let dir = spec.current_dir.clone().unwrap_or_default().join(&spec.args[2]);
    std::fs::create_dir_all(dir.join("bin")).unwrap();
}

impl RecordingRunner {
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(&CommandSpec) -> Result<CommandOutput> + Send + Sync + 'static,
    {
        Self {
            calls: Mutex::new(Vec::new()),
            handler: Box::new(handler),
        }
    }

    /// Every command succeeds; `installed` packages are listed by dpkg.
    pub fn succeeding(installed: &'static [&'static str]) -> Self {
        Self::new(move |spec| {
            if is_query(spec) {
                return ok(&dpkg_listing(installed));
            }
            if is_venv_create(spec) {
                create_venv_dir(spec);
            }
            exit(0)
        })
    }

    pub fn calls(&self) -> Vec<CommandSpec> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, predicate: fn(&CommandSpec) -> bool) -> usize {
        self.calls().iter().filter(|c| predicate(c)).count()
    }
}

#[async_trait]
impl CommandRunner for RecordingRunner {
    async fn run(&self, command: &CommandSpec) -> Result<CommandOutput> {
        self.calls.lock().unwrap().push(command.clone());
        (self.handler)(command)
    }
}

pub fn config_for(workdir: &Path) -> BootstrapConfig {
    BootstrapConfig::with_workdir(workdir)
}

pub fn write_entry_point(workdir: &Path) {
    std::fs::write(workdir.join("main.py"), "print(\"ok\")\n").unwrap();
}
