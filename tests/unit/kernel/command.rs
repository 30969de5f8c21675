use super::*;

#[test]
fn parses_path_commands() {
    assert_eq!(
        RootCommand::parse("root /work/proj/a.py"),
        Ok(RootCommand::Root(PathBuf::from("/work/proj/a.py")))
    );
    assert_eq!(
        RootCommand::parse("interpreter src"),
        Ok(RootCommand::Interpreter(PathBuf::from("src")))
    );
    assert_eq!(
        RootCommand::parse("python src"),
        Ok(RootCommand::Interpreter(PathBuf::from("src")))
    );
    assert_eq!(
        RootCommand::parse("debug-config main.py"),
        Ok(RootCommand::DebugConfig(PathBuf::from("main.py")))
    );
    assert_eq!(
        RootCommand::parse("test-config tests"),
        Ok(RootCommand::TestConfig(PathBuf::from("tests")))
    );
}

#[test]
fn path_argument_keeps_inner_spaces() {
    assert_eq!(
        RootCommand::parse("  root   /My Projects/app/a.py  "),
        Ok(RootCommand::Root(PathBuf::from("/My Projects/app/a.py")))
    );
}

#[test]
fn parses_zero_argument_commands() {
    assert_eq!(RootCommand::parse("invalidate"), Ok(RootCommand::Invalidate));
    assert_eq!(RootCommand::parse(" stats "), Ok(RootCommand::Stats));
}

#[test]
fn rejects_bad_input() {
    assert_eq!(RootCommand::parse("   "), Err(CommandError::Empty));
    assert_eq!(
        RootCommand::parse("rooot x"),
        Err(CommandError::Unknown("rooot".to_string()))
    );
    assert_eq!(
        RootCommand::parse("root"),
        Err(CommandError::MissingArgument("root"))
    );
    assert_eq!(
        RootCommand::parse("invalidate now"),
        Err(CommandError::UnexpectedArgument {
            command: "invalidate",
            arg: "now".to_string()
        })
    );
}

#[test]
fn every_listed_name_parses() {
    for name in RootCommand::NAMES {
        let parsed = RootCommand::from_parts(name, Some("x"))
            .or_else(|_| RootCommand::from_parts(name, None))
            .unwrap();
        assert_eq!(parsed.name(), *name);
    }
}

#[test]
fn errors_render_for_users() {
    assert_eq!(
        CommandError::MissingArgument("root").to_string(),
        "`root` needs a path argument"
    );
    assert_eq!(
        CommandError::Unknown("x".to_string()).to_string(),
        "unknown command: x"
    );
}
