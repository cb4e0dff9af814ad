use clap::{value_parser, Arg, ArgAction, ArgMatches};
use miette::{miette, Result};
use tracing_subscriber::EnvFilter;

use rich_help::style::{blend_text, Rgb, DEFAULT_BLEND_END, DEFAULT_BLEND_START};
use rich_help::{BannerAlign, CommandInfo, EpilogBlend, GroupInfo, RichApp};

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    // Without this, piping help to `head` panics on broken pipe.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    // Install miette's fancy error handler for beautiful diagnostics
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let filter = EnvFilter::try_from_env("RICH_HELP_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    app().run()
}

fn app() -> RichApp {
    RichApp::new(
        GroupInfo::named("rich-help")
            .help(
                "Styled help pages for command-line tools.\n\n\
                 Try [bold]--help[/bold] on any command to see banners, panels and gradients.",
            )
            .banner("[bold cyan]rich-help[/bold cyan] [dim]demo[/dim]")
            .banner_align(BannerAlign::Center)
            .epilog("Made with rich-help")
            .invoke_without_command(true)
            .no_args_is_help(true),
    )
    .callback(
        GroupInfo::new()
            .arg(
                Arg::new("version")
                    .long("version")
                    .action(ArgAction::SetTrue)
                    .help("Print the version and exit"),
            )
            .callback(root),
    )
    .command(
        CommandInfo::new("greet")
            .help(
                "Greet [green]NAME[/green] with a message.\n\n\
                 The message is printed before the name.",
            )
            .arg(Arg::new("name").help("Who to greet").required(true))
            .arg(
                Arg::new("message")
                    .short('m')
                    .long("message")
                    .help("The greeting")
                    .default_value("Hello"),
            )
            .arg(
                Arg::new("shout")
                    .long("shout")
                    .action(ArgAction::SetTrue)
                    .help("Print in upper case"),
            )
            .callback(greet),
    )
    .command(
        CommandInfo::new("info")
            .help("Print build information")
            .hidden(true)
            .callback(|_| {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }),
    )
    .command(
        CommandInfo::new("hello")
            .help("Say hello the old way. Use greet instead.")
            .deprecated(true)
            .callback(|_| {
                println!("Hello!");
                Ok(())
            }),
    )
    .add_group(
        color_app(),
        GroupInfo::named("color")
            .no_args_is_help(true)
            .epilog_blend(EpilogBlend::Colors(
                Rgb::new(255, 128, 0),
                Rgb::new(255, 0, 128),
            )),
    )
}

fn color_app() -> RichApp {
    RichApp::new(
        GroupInfo::named("palette")
            .help("Color utilities")
            .epilog("Colors are approximated on 256-color terminals"),
    )
    .callback(GroupInfo::new().help("Work with colors and gradients."))
    .command(
        CommandInfo::new("blend")
            .help("Print TEXT as a two-color gradient")
            .arg(Arg::new("text").help("Text to color").required(true))
            .arg(
                Arg::new("from")
                    .long("from")
                    .value_name("HEX")
                    .help("Start color")
                    .default_value(DEFAULT_BLEND_START.to_hex()),
            )
            .arg(
                Arg::new("to")
                    .long("to")
                    .value_name("HEX")
                    .help("End color")
                    .default_value(DEFAULT_BLEND_END.to_hex()),
            )
            .callback(blend),
    )
    .command(
        CommandInfo::new("hex")
            .help("Format an RGB triplet as hex")
            .args(["red", "green", "blue"].map(|channel| {
                Arg::new(channel)
                    .required(true)
                    .value_parser(value_parser!(u8))
            }))
            .callback(hex),
    )
}

fn root(matches: &ArgMatches) -> Result<()> {
    if matches.get_flag("version") {
        println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    }
    Ok(())
}

fn greet(matches: &ArgMatches) -> Result<()> {
    let name = matches
        .get_one::<String>("name")
        .ok_or_else(|| miette!("missing NAME"))?;
    let message = matches
        .get_one::<String>("message")
        .map(String::as_str)
        .unwrap_or("Hello");
    let line = format!("{message} {name}");
    if matches.get_flag("shout") {
        println!("{}", line.to_uppercase());
    } else {
        println!("{line}");
    }
    Ok(())
}

fn parse_color(matches: &ArgMatches, id: &str) -> Result<Rgb> {
    let value = matches
        .get_one::<String>(id)
        .ok_or_else(|| miette!("missing --{id}"))?;
    Rgb::from_hex(value).ok_or_else(|| miette!("invalid color '{value}', expected #RRGGBB"))
}

fn blend(matches: &ArgMatches) -> Result<()> {
    let text = matches
        .get_one::<String>("text")
        .ok_or_else(|| miette!("missing TEXT"))?;
    let start = parse_color(matches, "from")?;
    let end = parse_color(matches, "to")?;
    println!("{}", blend_text(text, start, end).render(console::colors_enabled()));
    Ok(())
}

fn hex(matches: &ArgMatches) -> Result<()> {
    let channel = |id: &str| {
        matches
            .get_one::<u8>(id)
            .copied()
            .ok_or_else(|| miette!("missing {id}"))
    };
    let rgb = Rgb::new(channel("red")?, channel("green")?, channel("blue")?);
    println!("{rgb}");
    Ok(())
}
