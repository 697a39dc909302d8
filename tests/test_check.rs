use assert_cmd::Command;
use assert_fs::{prelude::FileWriteStr, NamedTempFile};
use predicates::prelude::predicate;

fn check_instance(instance: &str) -> Result<assert_cmd::assert::Assert, Box<dyn std::error::Error>> {
    let file = NamedTempFile::new("test_instance.lp")?;
    file.write_str(instance)?;
    let mut cmd = Command::cargo_bin("dialabri")?;
    cmd.arg("check").arg("-f").arg(file.path());
    let assert = cmd.assert();
    file.close()?;
    Ok(assert)
}

#[test]
fn test_check_ok() -> Result<(), Box<dyn std::error::Error>> {
    check_instance("arg(a).\narg(b).\natt(a,b).\n")?
        .success()
        .stdout(predicate::str::contains("2 argument(s), 1 attack(s)"));
    Ok(())
}

#[test]
fn test_check_undeclared_argument() -> Result<(), Box<dyn std::error::Error>> {
    check_instance("arg(a).\natt(a,b).\n")?
        .failure()
        .stdout(predicate::str::contains(r#"undeclared argument "b" in att(a,b)"#));
    Ok(())
}

#[test]
fn test_check_expansion_cycle() -> Result<(), Box<dyn std::error::Error>> {
    check_instance("afstate(s).\nafstate(t).\nexpansionOf(s,t).\nexpansionOf(t,s).\n")?
        .failure()
        .stdout(predicate::str::contains("expansion cycle"));
    Ok(())
}

#[test]
fn test_check_syntax_error() -> Result<(), Box<dyn std::error::Error>> {
    check_instance("argument(a).\n")?.failure();
    Ok(())
}

#[test]
fn test_check_missing_file() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("dialabri")?;
    cmd.arg("check").arg("-f").arg("/this/file/does/not/exist.lp");
    cmd.assert().failure();
    Ok(())
}
