use std::path::Path;

pub fn run(root: &Path, port: u16, open: bool) -> anyhow::Result<()> {
    // Fail before binding when the project is not initialized.
    super::Project::open(root)?;

    let rt = tokio::runtime::Runtime::new()?;
    let root_buf = root.to_path_buf();

    rt.block_on(async move {
        let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await?;
        let actual_port = listener.local_addr()?.port();
        println!("Review board → http://localhost:{actual_port}/api/board");

        tokio::select! {
            res = review_server::serve_on(root_buf, listener, open) => res,
            _ = tokio::signal::ctrl_c() => Ok(()),
        }
    })
}
