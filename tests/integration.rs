use clom::{Arg, Call, Error, Operation, STDERR, STDOUT, UNSET, and, command, or};

macro_rules! render_test {
    ($name:ident, $op:expr, $expected:expr) => {
        #[test]
        fn $name() {
            let op = $op;
            assert_eq!(op.render().unwrap(), $expected, "operation: {:?}", op);
        }
    };
}

/// Undo shell quoting the way `sh` would for a single word.
fn unquote(token: &str) -> String {
    let mut words = shlex::split(token).expect("token must be valid shell");
    assert_eq!(words.len(), 1, "token {token:?} split into {words:?}");
    words.remove(0)
}

// ── Commands and sub-commands ──

render_test!(bare_command, command("vagrant"), "vagrant");
render_test!(
    subcommand_with_opts,
    command("vagrant")
        .with_opts(["--list"])
        .subcommand("ssh_config")
        .with_opts(["--help"]),
    "vagrant --list ssh_config --help"
);
render_test!(
    nested_subcommands,
    command("vagrant").subcommand("ssh_config").subcommand("extra"),
    "vagrant ssh_config extra"
);
render_test!(
    grep_opts_and_args,
    command("grep")
        .with_opts(["--file", "myfile.txt"])
        .with_opt("m", 2)
        .with_args(["*.pyc", "test.txt"]),
    "grep --file myfile.txt -m 2 '*.pyc' test.txt"
);
render_test!(
    curl_header,
    command("curl")
        .with_opts(["--basic"])
        .with_opt("header", "X-Test: 1")
        .with_opt("f", true),
    "curl --basic -f --header 'X-Test: 1'"
);
render_test!(
    echo_single_quote,
    command("echo").call(["don't test me"]),
    r"echo 'don'\''t test me'"
);
render_test!(
    git_status_from_parent_with_env,
    command("git").with_env([("GIT_PAGER", "cat")]).subcommand("log"),
    "env GIT_PAGER=cat git log"
);

// ── Fabric dialect ──

render_test!(fab_list_flag, command("fab").with_opt("list", true), "fab --list");
render_test!(fab_list_opt, command("fab").with_opts(["--list"]), "fab --list");
render_test!(fab_keyword, command("fab").with_opt("i", "keyfile"), "fab -i keyfile");
render_test!(
    fab_tasks,
    command("fab")
        .subcommand("test")
        .call(["doctest", "unit"])
        .subcommand("deploy")
        .call(["dev"]),
    "fab test:doctest,unit deploy:dev"
);
render_test!(
    fab_hosts_task,
    command("fab")
        .with_opts(["-a"])
        .with_opt("hosts", "dev.host")
        .subcommand("deploy")
        .with_args(["dev", "test"]),
    "fab -a --hosts dev.host deploy:dev,test"
);

// ── Conjunctions ──

render_test!(
    and_group,
    and!(
        command("grep").call(["*.pyc", "test.txt"]),
        command("wc"),
        command("cat")
    ),
    "( grep '*.pyc' test.txt && wc && cat )"
);
render_test!(
    or_group_piped,
    or!(
        command("grep").call(["*.pyc", "test.txt"]),
        command("wc"),
        command("cat")
    )
    .pipe_to(command("wc")),
    "( grep '*.pyc' test.txt || wc || cat ) | wc"
);

// ── Redirects and environment ──

render_test!(append, command("grep").append_to_file("test.txt", STDOUT), "grep >> test.txt");
render_test!(
    append_stderr,
    command("grep").append_to_file("test.txt", STDERR),
    "grep 2>> test.txt"
);
render_test!(output, command("grep").output_to_file("test.txt", STDOUT), "grep > test.txt");
render_test!(
    output_stderr,
    command("grep").output_to_file("test.txt", STDERR),
    "grep 2> test.txt"
);
render_test!(hide, command("grep").hide_output(STDOUT), "grep > /dev/null");
render_test!(hide_stderr, command("grep").hide_output(STDERR), "grep 2> /dev/null");
render_test!(merge_stderr, command("cat").redirect(STDERR, STDOUT), "cat 2>&1");
render_test!(from_file, command("cat").from_file("list.txt"), "cat < list.txt");
render_test!(env_prefix, command("ls").with_env([("foo", "true")]), "env foo=true ls");
render_test!(
    background,
    command("ls").background(),
    "nohup ls > /dev/null 2>&1 &"
);

// ── Piping ──

#[test]
fn piping_chains_in_call_order() {
    let ls = command("ls").with_opts(["-lah"]);
    let echo = command("echo").with_opts(["monkey", "gorilla"]);
    let grep = command("grep").with_opts(["monkey"]);

    let expected = "ls -lah | echo monkey gorilla";
    assert_eq!(ls.pipe_to(echo.clone()), expected);
    assert_eq!(ls.clone() | echo.clone(), expected);

    let both = ls.pipe_to(echo).pipe_to(grep);
    assert_eq!(both.render().unwrap(), format!("{expected} | grep monkey"));
    assert_eq!(ls, "ls -lah");
}

// ── Value semantics ──

#[test]
fn new_commands_are_fresh() {
    assert_ne!(
        command("ls").with_opts(["-r"]).render().unwrap(),
        command("ls").with_opts(["-lah"]).render().unwrap()
    );
    assert_ne!(
        command("ls").with_env([("foo", "monkey")]).render().unwrap(),
        command("ls").render().unwrap()
    );
}

#[test]
fn clones_do_not_alias() {
    let a = command("cmd").with_opt("x", 1);
    let b = a.with_opt("y", 2).hide_output(STDERR).with_env([("Z", "z")]);
    assert_eq!(a, "cmd -x 1");
    assert_eq!(b, "env Z=z cmd -x 1 -y 2 2> /dev/null");
}

#[test]
fn keyword_order_is_lexical() {
    let ab = command("cmd").with_kw_opts([("b", 1), ("a", 2)]);
    let ba = command("cmd").with_kw_opts([("a", 2), ("b", 1)]);
    assert_eq!(ab, ba);
    assert_eq!(ab, "cmd -a 2 -b 1");
}

#[test]
fn unset_never_rendered() {
    let cmd = command("cmd")
        .with_opts([UNSET, Arg::from("-v")])
        .with_opt("skip", UNSET)
        .with_args([Arg::from("a"), UNSET]);
    assert_eq!(cmd, "cmd -v a");
}

#[test]
fn false_option_is_rejected() {
    let err = command("cmd").with_opt("force", false).render().unwrap_err();
    assert!(matches!(err, Error::InvalidOption { .. }));
}

#[test]
fn trailing_call_renders() {
    let call = Call::new().opt("n", 1).arg("test.txt");
    assert_eq!(
        command("cat").as_string_with(&call).unwrap(),
        "cat -n 1 test.txt"
    );
}

// ── Escaping laws ──

#[test]
fn safe_strings_unchanged() {
    for s in ["abc", "a-b_c", "user@host:/p/a.th", "k=v,w", "50%", "+1", "ünïcödé"] {
        assert_eq!(Arg::from(s).escape().unwrap(), s);
    }
}

#[test]
fn unsafe_strings_round_trip() {
    let samples = [
        "*.pyc",
        "two words",
        "don't",
        "''",
        "$HOME",
        "`id`",
        r#"a"b"#,
        r"back\slash",
        "semi;colon",
        "new\nline",
        r#" $`'" \ "#,
    ];
    for s in samples {
        let token = Arg::from(s).escape().unwrap();
        assert!(token.starts_with('\'') && token.ends_with('\''), "{token}");
        assert_eq!(unquote(&token), s, "token: {token}");
    }
}

#[test]
fn empty_and_null_are_quoted() {
    assert_eq!(Arg::from("").escape().unwrap(), "''");
    assert_eq!(Arg::from(None::<&str>).escape().unwrap(), "''");
}

#[test]
fn numbers_never_quoted() {
    assert_eq!(Arg::from(-3).escape().unwrap(), "-3");
    assert_eq!(Arg::from(0.25).escape().unwrap(), "0.25");
    assert_eq!(Arg::from(42u8).escape().unwrap(), "42");
}

// ── Concatenation ──

#[test]
fn concat_with_strings() {
    assert_eq!(
        command("echo").call(["test"]).concat(" > test.txt").unwrap(),
        "echo test > test.txt"
    );
    assert_eq!(
        command("echo").prepend("cat test.txt | ").unwrap(),
        "cat test.txt | echo"
    );
}

#[test]
fn concat_operations_rejected() {
    let err = command("ls").concat(command("wc")).unwrap_err();
    assert!(matches!(err, Error::InvalidCombination(_)));
    let err = command("ls").prepend(and!(command("a"))).unwrap_err();
    assert!(matches!(err, Error::InvalidCombination(_)));
}

// ── Shell ──

const SHELL_STUFF: &str = r#"$`'" \ x"#;

#[test]
fn shell_captures_output() {
    let result = command("echo").shell().invoke_with(&Call::new().arg("foo")).unwrap();
    assert_eq!(result, "foo");
    assert_eq!(result.return_code(), 0);
    assert_eq!(result.code(), result.return_code());
    assert_eq!(command("echo").call(["foo"]).shell().first().unwrap(), "foo");
}

#[test]
fn shell_empty_output() {
    let result = command("echo").call([""]).shell().invoke().unwrap();
    assert_eq!(result, "");
    assert_eq!(result.to_string(), "");
    assert_eq!(result, command("echo").call([""]).shell().invoke().unwrap());
    assert!(matches!(result.first(true), Err(Error::EmptyResult)));
}

#[test]
fn shell_iterates_lines() {
    let result = command("printf").call(["a\\nb\\nc\\n"]).shell().invoke().unwrap();
    let lines: Vec<&str> = result.iter().collect();
    assert_eq!(lines, vec!["a", "b", "c"]);
    let again: Vec<&str> = (&result).into_iter().collect();
    assert_eq!(again, lines);
}

#[test]
fn special_characters_round_trip() {
    let printf = command("printf").call(["%s", SHELL_STUFF]);
    assert_eq!(printf.shell().invoke().unwrap(), SHELL_STUFF);
}

#[test]
fn substitution_round_trip() {
    let inner = command("printf").call(["%s", SHELL_STUFF]);
    let outer = command("printf").with_args([
        Arg::from("%s|%s"),
        Arg::from(inner),
        Arg::from(SHELL_STUFF),
    ]);
    assert_eq!(
        outer.shell().invoke().unwrap(),
        format!("{SHELL_STUFF}|{SHELL_STUFF}").as_str()
    );
}

const ECHO_STUFF: &str = r#" $`'" \ "#;

#[test]
fn echo_special_characters_trimmed() {
    let echo = command("echo").call([ECHO_STUFF]);
    assert_eq!(echo.shell().invoke().unwrap(), ECHO_STUFF.trim());
}

#[test]
fn echo_substitution_trimmed() {
    let inner = command("echo").call([ECHO_STUFF]);
    let outer = command("echo").with_args([Arg::from(inner)]);
    assert_eq!(outer.shell().invoke().unwrap(), ECHO_STUFF.trim());
}

#[test]
fn conjunction_runs() {
    let both = and!(command("echo").call(["a"]), command("echo").call(["b"]));
    assert_eq!(both.shell().all().unwrap(), vec!["a", "b"]);
    let fallback = or!(command("false"), command("echo").call(["rescued"]));
    assert_eq!(fallback.shell().last().unwrap(), "rescued");
}

#[test]
fn env_reaches_process() {
    let printenv = command("printenv").call(["CLOM_TEST"]).with_env([("CLOM_TEST", "a b")]);
    assert_eq!(printenv.shell().invoke().unwrap(), "a b");
}

#[test]
fn failure_reports_command_and_stderr() {
    let ls = command("ls").call(["/definitely/not/here"]);
    let err = ls.shell().invoke().unwrap_err();
    let msg = err.to_string();
    assert!(msg.starts_with("Error while executing \"ls /definitely/not/here\""), "{msg}");
    assert!(err.exit_code().is_some_and(|c| c != 0));
}

#[test]
fn background_does_not_capture() {
    let result = command("true").background().shell().invoke().unwrap();
    assert_eq!(result.stdout(), "");
    assert_eq!(result.return_code(), 0);
}
