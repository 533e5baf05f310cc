//! gotags CLI entry point

use std::fs;
use std::io::{self, BufWriter, Read, Write};
use std::process::ExitCode;

use clap::CommandFactory;
use tracing::info;

use gotags::indexing::{expand_inputs, read_file_list};
use gotags::logging::init_logging;
use gotags::syntax::GoParser;
use gotags::{Cli, GoTagsError, ProgramInfo, TagCollector};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}\n", e);
            if matches!(e, GoTagsError::NoInput | GoTagsError::FileList { .. }) {
                eprintln!("{}", Cli::command().render_usage());
            }
            e.exit_code()
        }
    }
}

fn run() -> gotags::Result<()> {
    let cli = Cli::parse_args();
    init_logging(cli.verbose);

    let program = ProgramInfo::default();
    if cli.print_version {
        println!("{} version {}", program.name, program.version);
        return Ok(());
    }

    let collector = TagCollector::new(cli.tag_options(), program);

    let output = if cli.stdin {
        info!("reading from stdin");
        let mut source = String::new();
        io::stdin().read_to_string(&mut source)?;
        collector.run_source("-", &source)
    } else {
        let mut names = cli.files.clone();
        if let Some(list) = &cli.input_list {
            names.extend(read_file_list(list)?);
        }

        let files = expand_inputs(&names, cli.recurse);
        if files.is_empty() {
            return Err(GoTagsError::NoInput);
        }

        if cli.tree {
            return print_tree(&files[0]);
        }

        info!(files = files.len(), "indexing");
        collector.run(&files)
    };

    for diagnostic in output.diagnostics() {
        eprintln!("{}\n", diagnostic);
    }

    write_lines(&cli.output, &output.lines)?;
    Ok(())
}

fn write_lines(target: &str, lines: &[String]) -> io::Result<()> {
    let sink: Box<dyn Write> = if target == "-" {
        Box::new(io::stdout().lock())
    } else {
        Box::new(fs::File::create(target)?)
    };

    let mut writer = BufWriter::new(sink);
    for line in lines {
        writeln!(writer, "{}", line)?;
    }
    writer.flush()
}

/// Print the syntax tree of one file (debugging)
fn print_tree(path: &str) -> gotags::Result<()> {
    let source = fs::read_to_string(path).map_err(|source| GoTagsError::Read {
        path: path.to_string(),
        source,
    })?;
    let tree = GoParser::new()?.syntax_tree(path, &source)?;
    print_ast(&tree.root_node(), &source, 0);
    Ok(())
}

fn print_ast(node: &tree_sitter::Node, source: &str, depth: usize) {
    let indent = "  ".repeat(depth);
    let text = node
        .utf8_text(source.as_bytes())
        .unwrap_or("<invalid utf8>");
    let preview: String = text.chars().take(50).collect();
    let preview = preview.replace('\n', "\\n");

    println!(
        "{}{}{} [{}-{}] \"{}\"{}",
        indent,
        node.kind(),
        if node.is_named() { "" } else { " (anonymous)" },
        node.start_position().row + 1,
        node.end_position().row + 1,
        preview,
        if text.chars().count() > 50 { "..." } else { "" }
    );

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        print_ast(&child, source, depth + 1);
    }
}
