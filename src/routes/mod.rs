mod health_check;
mod locale_redirect;
mod sitemap;
mod subscribe;

pub use health_check::*;
pub use locale_redirect::*;
pub use sitemap::*;
pub use subscribe::*;

pub fn error_chain_fmt(
    e: &impl std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{}\n", e)?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }
    Ok(())
}
