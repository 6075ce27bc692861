/*!
 * Tests for codedigest functionality
 */

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use indicatif::ProgressBar;
use tempfile::tempdir;

use crate::config::{Config, Options, ReportFormat, DEFAULT_OUTPUT};
use crate::error::CodeDigestError;
use crate::interrupt::Interrupt;
use crate::policy::{MarkdownMode, Profile};
use crate::scanner::Scanner;
use crate::types::Digest;
use crate::writer::{write_atomic, MarkdownWriter};

fn write_file(root: &Path, rel: &str, content: &str) -> io::Result<()> {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())
}

// Helper function to create a small .NET style project
fn setup_test_project() -> io::Result<tempfile::TempDir> {
    let temp_dir = tempdir()?;
    let root = temp_dir.path();

    write_file(root, "Shop.sln", "Microsoft Visual Studio Solution File\n")?;
    write_file(root, "README.md", "# Shop\n")?;
    write_file(root, "CHANGELOG.md", "## 1.0\n")?;
    write_file(
        root,
        "src/Program.cs",
        "// entry point\nusing System;\n\nclass Program { /* main */ }\n",
    )?;
    write_file(root, "src/api/client.js", "const url = \"http://x\"; // remote\n")?;
    write_file(root, "src/Shop.csproj", "<!-- build -->\n<Project />\n")?;
    write_file(root, "src/Views/Index.razor", "<h1>Hi</h1>\n")?;
    write_file(root, "src/site.css", "body {}\n")?;
    write_file(root, "src/app.min.js", "var a=1;\n")?;
    write_file(root, "bin/Debug/Shop.cs", "class Built {}\n")?;
    write_file(root, "node_modules/lib/index.js", "module.exports = 1;\n")?;
    write_file(root, ".vs/settings.json", "{}\n")?;

    Ok(temp_dir)
}

fn config_for(root: &Path, options: Options) -> Config {
    Config {
        target_dir: root.to_path_buf(),
        output_file: root.join(DEFAULT_OUTPUT),
        options,
        profile: Profile::Dotnet,
        num_threads: 2,
        report: ReportFormat::Table,
    }
}

fn scan(config: &Config) -> Digest {
    let scanner = Scanner::new(config.clone(), Arc::new(ProgressBar::hidden()));
    scanner.scan().expect("scan should succeed")
}

fn paths(digest: &Digest) -> Vec<PathBuf> {
    digest.files().map(|f| f.path.clone()).collect()
}

#[test]
fn test_scan_selects_and_orders_files() {
    let temp_dir = setup_test_project().unwrap();
    let digest = scan(&config_for(temp_dir.path(), Options::default()));

    let expected: Vec<PathBuf> = [
        "README.md",
        "Shop.sln",
        "src/Program.cs",
        "src/Shop.csproj",
        "src/Views/Index.razor",
        "src/api/client.js",
    ]
    .iter()
    .map(PathBuf::from)
    .collect();
    assert_eq!(paths(&digest), expected);

    let dirs: Vec<&str> = digest.groups.iter().map(|g| g.rel_dir.as_str()).collect();
    assert_eq!(dirs, vec![".", "src", "src/Views", "src/api"]);

    let stats = digest.statistics();
    assert_eq!(stats.total_files, 6);
    assert_eq!(stats.total_directories, 4);
    assert_eq!(stats.file_types.get(".cs"), Some(&1));
    assert_eq!(stats.file_types.get(".css"), None);
}

#[test]
fn test_scan_respects_options() {
    let temp_dir = setup_test_project().unwrap();
    let options = Options {
        remove_comments: false,
        markdown_mode: MarkdownMode::All,
        include_js: false,
    };
    let digest = scan(&config_for(temp_dir.path(), options));
    let found = paths(&digest);

    assert!(found.contains(&PathBuf::from("CHANGELOG.md")));
    assert!(!found.iter().any(|p| p.extension().is_some_and(|e| e == "js")));
}

#[test]
fn test_comment_removal_applies_per_language() {
    let temp_dir = setup_test_project().unwrap();
    let options = Options {
        remove_comments: true,
        ..Options::default()
    };
    let digest = scan(&config_for(temp_dir.path(), options));
    let content = |name: &str| {
        digest
            .files()
            .find(|f| f.name == name)
            .map(|f| f.content.clone())
            .unwrap()
    };

    assert_eq!(content("Program.cs"), "using System;\n\nclass Program {  }\n");
    assert_eq!(content("client.js"), "const url = \"http://x\";\n");
    assert_eq!(content("Shop.csproj"), "<Project />\n");
    assert_eq!(content("README.md"), "# Shop\n");
}

#[test]
fn test_comments_kept_when_not_requested() {
    let temp_dir = setup_test_project().unwrap();
    let digest = scan(&config_for(temp_dir.path(), Options::default()));
    let program = digest.files().find(|f| f.name == "Program.cs").unwrap();
    assert!(program.content.starts_with("// entry point"));
    assert_eq!(program.original_lines, 4);
}

#[test]
fn test_write_document() {
    let temp_dir = setup_test_project().unwrap();
    let config = config_for(temp_dir.path(), Options::default());
    let digest = scan(&config);

    MarkdownWriter::new(config.clone()).write(&digest, &Interrupt::default()).unwrap();
    let document = fs::read_to_string(&config.output_file).unwrap();

    assert!(document.starts_with("# Code Structure Analysis\n"));
    assert!(document.contains("**Comment Processing:** Comments Preserved"));
    assert!(document.contains("**Markdown Included:** README.md only"));
    assert!(document.contains("- **Total Included Files:** 6"));
    assert!(document.contains("- **.cs**: 1 files"));
    assert!(document.contains("### Root Directory"));
    assert!(document.contains("### Directory: src/api"));
    assert!(document.contains("#### 💾 Program.cs"));
    assert!(document.contains("**File Type:** .CS (csharp)"));
    assert!(document.contains("```html\n<h1>Hi</h1>\n"));
    assert!(!document.contains("node_modules"));
    assert!(!document.contains("Built"));

    // Files appear in group order
    let readme = document.find("#### 💾 README.md").unwrap();
    let program = document.find("#### 💾 Program.cs").unwrap();
    let client = document.find("#### 💾 client.js").unwrap();
    assert!(readme < program && program < client);
}

#[test]
fn test_rescan_skips_previous_output() {
    let temp_dir = setup_test_project().unwrap();
    let options = Options {
        markdown_mode: MarkdownMode::All,
        ..Options::default()
    };
    let config = config_for(temp_dir.path(), options);

    let first = scan(&config);
    MarkdownWriter::new(config.clone()).write(&first, &Interrupt::default()).unwrap();

    let second = scan(&config);
    assert_eq!(paths(&first), paths(&second));
    assert!(!paths(&second).contains(&PathBuf::from(DEFAULT_OUTPUT)));
}

#[test]
fn test_latin1_file_is_read() {
    let temp_dir = tempdir().unwrap();
    fs::write(temp_dir.path().join("Legacy.cs"), b"// caf\xe9\nclass C {}\n").unwrap();

    let digest = scan(&config_for(temp_dir.path(), Options::default()));
    let file = digest.files().next().unwrap();
    assert!(!file.read_failed);
    assert!(file.content.starts_with("// café"));
}

#[cfg(unix)]
#[test]
fn test_unreadable_file_gets_marker() {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("Secret.cs");
    fs::write(&path, "class Secret {}\n").unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o000)).unwrap();

    // Privileged users can read the file anyway
    if fs::read(&path).is_ok() {
        return;
    }

    let digest = scan(&config_for(temp_dir.path(), Options::default()));
    let file = digest.files().next().unwrap();
    assert!(file.read_failed);
    assert!(file.content.starts_with("Error reading file: "));
    assert_eq!(digest.statistics().total_files, 1);
}

#[test]
fn test_empty_project_renders_document() {
    let temp_dir = tempdir().unwrap();
    let config = config_for(temp_dir.path(), Options::default());
    let digest = scan(&config);
    assert!(digest.groups.is_empty());

    let document = MarkdownWriter::new(config).render(&digest, chrono::Local::now());
    assert!(document.contains("- **Total Included Files:** 0"));
    assert!(!document.contains("### File Type Breakdown"));
}

#[test]
fn test_failed_write_leaves_no_file() {
    let temp_dir = tempdir().unwrap();
    let target = temp_dir.path().join("missing").join("out.md");

    let result = write_atomic(&target, b"content", &Interrupt::default());
    assert!(matches!(result, Err(CodeDigestError::Write(_))));
    assert!(!target.exists());
}

#[test]
fn test_write_replaces_existing_output() {
    let temp_dir = tempdir().unwrap();
    let target = temp_dir.path().join("out.md");
    fs::write(&target, "old").unwrap();

    write_atomic(&target, b"new", &Interrupt::default()).unwrap();
    assert_eq!(fs::read_to_string(&target).unwrap(), "new");

    let leftovers = fs::read_dir(temp_dir.path()).unwrap().count();
    assert_eq!(leftovers, 1);
}

#[test]
fn test_interrupt_during_write_keeps_previous_output() {
    let temp_dir = tempdir().unwrap();
    let target = temp_dir.path().join("out.md");
    fs::write(&target, "old").unwrap();

    let interrupt = Interrupt::default();
    let guard = interrupt.defer().unwrap();
    assert!(!interrupt.trigger());

    let result = write_atomic(&target, b"new", &interrupt);
    drop(guard);
    assert!(matches!(result, Err(CodeDigestError::Interrupted)));
    assert_eq!(fs::read_to_string(&target).unwrap(), "old");

    // The temporary file is gone too
    let leftovers = fs::read_dir(temp_dir.path()).unwrap().count();
    assert_eq!(leftovers, 1);
}

#[test]
fn test_write_refused_after_interrupt() {
    let temp_dir = setup_test_project().unwrap();
    let config = config_for(temp_dir.path(), Options::default());
    let digest = scan(&config);

    let interrupt = Interrupt::default();
    interrupt.trigger();
    let result = MarkdownWriter::new(config.clone()).write(&digest, &interrupt);
    assert!(matches!(result, Err(CodeDigestError::Interrupted)));
    assert!(!config.output_file.exists());
}

#[cfg(unix)]
#[test]
fn test_file_symlinks_are_listed() {
    use std::os::unix::fs::symlink;

    let temp_dir = tempdir().unwrap();
    let root = temp_dir.path();
    write_file(root, "src/Real.cs", "class Real {}\n").unwrap();
    symlink(root.join("src/Real.cs"), root.join("src/Link.cs")).unwrap();
    symlink(root.join("src"), root.join("alias")).unwrap();

    let digest = scan(&config_for(root, Options::default()));
    assert_eq!(
        paths(&digest),
        vec![PathBuf::from("src/Link.cs"), PathBuf::from("src/Real.cs")]
    );

    let link = digest.files().next().unwrap();
    assert_eq!(link.content, "class Real {}\n");
    assert_eq!(link.size, 14);
}
