use assert_cmd::assert::OutputAssertExt;
use assert_cmd::Command;
use predicates::prelude::*;

fn gigatools(dir: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("gigatools").unwrap();
    cmd.env_remove("RUST_LOG")
        .env("HOME", dir.path())
        .arg("--config")
        .arg(dir.path().join("gigatools.toml"));
    cmd
}

#[test]
fn missing_credential_fails_before_reading_input() {
    let dir = tempfile::tempdir().unwrap();
    gigatools(&dir)
        .write_stdin("what is 3 plus 8\nexit\n")
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("missing credential"));
}

#[test]
fn blank_credential_counts_as_missing() {
    let dir = tempfile::tempdir().unwrap();
    gigatools(&dir)
        .arg("   ")
        .write_stdin("exit\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing credential"));
}

#[test]
fn malformed_config_is_a_startup_error() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("gigatools.toml"), "max_retries = \"many\"\n").unwrap();
    gigatools(&dir)
        .arg("key")
        .write_stdin("exit\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load config"));
}

#[test]
fn help_mentions_the_auth_key() {
    Command::cargo_bin("gigatools")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("AUTH_KEY"));
}

mod against_mock_server {
    use super::*;
    use gigatools::agent::system_prompt::EXAMPLE_PROMPTS;
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn mock_gigachat() -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v2/oauth"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "tok",
                "expires_at": 4_102_444_800_000i64,
            })))
            .mount(&server)
            .await;
        server
    }

    fn write_config(dir: &tempfile::TempDir, server: &MockServer) {
        let config = format!(
            "auth_url = \"{uri}/api/v2/oauth\"\napi_url = \"{uri}/api/v1\"\nmax_retries = 1\n",
            uri = server.uri()
        );
        std::fs::write(dir.path().join("gigatools.toml"), config).unwrap();
    }

    async fn run(dir: tempfile::TempDir, stdin: &'static str) -> assert_cmd::assert::Assert {
        tokio::task::spawn_blocking(move || {
            gigatools(&dir)
                .env_remove("HTTP_PROXY")
                .env_remove("HTTPS_PROXY")
                .env_remove("ALL_PROXY")
                .env_remove("http_proxy")
                .env_remove("https_proxy")
                .env_remove("all_proxy")
                .arg("a2V5")
                .write_stdin(stdin)
                .output()
                .unwrap()
        })
        .await
        .unwrap()
        .assert()
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn one_question_one_answer_then_exit() {
        let server = mock_gigachat().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/chat/completions"))
            .and(body_string_contains("\"role\":\"function\""))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{ "message": { "role": "assistant", "content": "3 plus 8 is 11" } }]
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{ "message": {
                    "role": "assistant",
                    "content": "",
                    "function_call": { "name": "add", "arguments": { "value1": 3, "value2": 8 } }
                } }]
            })))
            .up_to_n_times(1)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        write_config(&dir, &server);
        let assert = run(dir, "what is 3 plus 8\nEXIT\nnever sent\n")
            .await
            .success()
            .stdout("3 plus 8 is 11\n")
            .stderr(predicate::str::contains("Start dialog (type 'exit' to exit):"))
            .stderr(predicate::str::contains("add value1: 3, value2: 8"));
        let stderr = String::from_utf8_lossy(&assert.get_output().stderr);
        for prompt in EXAMPLE_PROMPTS {
            assert!(stderr.contains(prompt), "missing example prompt {:?}", prompt);
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn end_of_input_exits_zero() {
        let server = mock_gigachat().await;
        let dir = tempfile::tempdir().unwrap();
        write_config(&dir, &server);
        run(dir, "").await.success().stdout(predicate::str::is_empty());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn transport_failure_exits_non_zero_with_details() {
        let server = mock_gigachat().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(402).set_body_string("payment required"))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        write_config(&dir, &server);
        run(dir, "hello\nexit\n")
            .await
            .failure()
            .code(1)
            .stdout(predicate::str::is_empty())
            .stderr(predicate::str::contains("code: 402 response: payment required"));
    }
}
