//! Virtual machine images and compatibility layers.

use crate::classifier::{Classifier, KnownPath};
use crate::paths::HostPaths;

/// Disk images of VirtualBox, Vagrant, libvirt, GNOME Boxes, VMware and
/// QEMU, plus Wine-style prefixes.
pub struct VirtualMachinesClassifier {
    host: HostPaths,
}

impl VirtualMachinesClassifier {
    pub fn new(host: &HostPaths) -> Self {
        Self { host: host.clone() }
    }
}

impl Classifier for VirtualMachinesClassifier {
    fn name(&self) -> &'static str {
        "virtual_machines"
    }

    fn display_name(&self) -> &'static str {
        "Virtual Machines"
    }

    fn known_paths(&self) -> Vec<KnownPath> {
        let h = &self.host;
        vec![
            KnownPath::new("VirtualBox VM", h.in_home("VirtualBox VMs")),
            KnownPath::new("Vagrant Box", h.in_home(".vagrant.d/boxes")),
            KnownPath::new("libvirt VM", h.in_home(".local/share/libvirt/images")),
            KnownPath::new("GNOME Boxes VM", h.in_home(".local/share/gnome-boxes/images")),
            KnownPath::new("VMware VM", h.in_home("vmware")),
            KnownPath::new("QEMU VM", h.in_home(".qemu")),
            KnownPath::new("Wine", h.in_home(".wine")),
            KnownPath::new("Bottles", h.in_home(".local/share/bottles")),
            KnownPath::new("Heroic Games Launcher", h.in_home(".config/heroic")),
        ]
    }
}
