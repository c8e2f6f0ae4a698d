//! Rebuilds the record of an existing VM from its uuid.
//!
//! Usage: `cargo run --example import_vm -- <vm-uuid>`

use idcloudhost_provisioner::{IdcloudhostClient, IdcloudhostResult, ResourceAdapter};

#[tokio::main]
async fn main() -> IdcloudhostResult<()> {
    tracing_subscriber::fmt().init();

    let vm_id = std::env::args()
        .nth(1)
        .expect("usage: import_vm <vm-uuid>");

    let client = IdcloudhostClient::from_env()?;
    let vm = client.vms().import(&vm_id).await?;

    println!("VM {}", vm_id);
    println!("  name:            {}", vm.name);
    println!("  location:        {}", vm.location.as_deref().unwrap_or("(default)"));
    println!("  os:              {} {}", vm.os_name, vm.os_version);
    println!("  size:            {} vCPU / {} MB / {} GB", vm.vcpu, vm.ram, vm.disks);
    println!("  private network: {}", vm.private_network_uuid);
    println!("  floating IP:     {}", vm.float_ip().unwrap_or("-"));
    println!("  password:        {}", vm.password.as_str());

    Ok(())
}
