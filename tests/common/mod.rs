//! Common test utilities and fixtures

#![allow(dead_code)]

use assert_cmd::Command;
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Endpoint nothing listens on; connections are refused immediately.
pub const UNREACHABLE: &str = "http://127.0.0.1:9";

pub fn users_fixture() -> Vec<Value> {
    vec![
        json!({
            "id": 1,
            "name": "Leanne Graham",
            "username": "Bret",
            "email": "Sincere@april.biz",
            "address": {"street": "Kulas Light", "city": "Gwenborough"}
        }),
        json!({
            "id": 2,
            "name": "Ervin Howell",
            "username": "Antonette",
            "email": "Shanna@melissa.tv",
            "address": {"street": "Victor Plains", "city": "Wisokyburgh"}
        }),
        json!({
            "id": 3,
            "name": "Clementine Bauch",
            "username": "Samantha",
            "email": "Nathan@yesenia.net",
            "address": {"street": "Douglas Extension", "city": "McKenziehaven"}
        }),
    ]
}

/// Three posts by user 2, two by user 1, none by user 3.
pub fn posts_fixture() -> Vec<Value> {
    [2, 1, 2, 1, 2]
        .iter()
        .enumerate()
        .map(|(i, user_id)| json!({"userId": user_id, "id": i + 1, "title": "t", "body": "b"}))
        .collect()
}

/// A scratch working directory for running the binary.
pub struct Workspace {
    pub temp_dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Workspace with `datas/users.json` and `datas/posts.json` already present
    pub fn with_local_data() -> Self {
        let workspace = Self::new();
        workspace.write_json("datas/users.json", &users_fixture());
        workspace.write_json("datas/posts.json", &posts_fixture());
        workspace
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn join(&self, relative: &str) -> PathBuf {
        self.path().join(relative)
    }

    pub fn write_json(&self, relative: &str, value: &[Value]) {
        let path = self.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, serde_json::to_string_pretty(value).unwrap()).unwrap();
    }

    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.join(relative)).unwrap()
    }

    /// The binary, run inside this workspace against `base_url`
    pub fn command(&self, base_url: &str) -> Command {
        let mut cmd = Command::cargo_bin("user-activity").unwrap();
        cmd.current_dir(self.path())
            .env_remove("RUST_LOG")
            .env("USER_ACTIVITY_USERS_URL", format!("{base_url}/users"))
            .env("USER_ACTIVITY_POSTS_URL", format!("{base_url}/posts"))
            .env("USER_ACTIVITY_TIMEOUT", "5s");
        cmd
    }
}
