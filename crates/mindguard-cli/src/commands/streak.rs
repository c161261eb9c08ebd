use crate::context::Context;

pub fn run(user: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = Context::load()?;
    let user = ctx.user(user);
    let record = ctx.service(ctx.clock).streak(&user)?;
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}
