use super::{Category, Locale, Operation};

use Locale::{En, Tr};

/// 組み込みのオペレーション一覧 (表示順)
pub(super) fn builtin_operations() -> Vec<Operation> {
    vec![
        Operation::new(
            "ultimate-power",
            Category::Power,
            [(Tr, "NİHAİ GÜÇ"), (En, "ULTIMATE POWER")],
            &["powercfg -duplicatescheme e9a42b02-d5df-448d-aa00-03f14749eb61"],
        ),
        Operation::new(
            "clean-ram",
            Category::Memory,
            [(Tr, "RAM TEMİZLE"), (En, "CLEAN RAM")],
            &["ipconfig /flushdns && timeout 1"],
        ),
        Operation::new(
            "optimize-dns",
            Category::Network,
            [(Tr, "DNS OPT."), (En, "DNS OPT.")],
            &[r#"netsh interface ip set dns name="Ethernet" static 8.8.8.8"#],
        ),
        Operation::new(
            "gpu-boost",
            Category::Graphics,
            [(Tr, "GPU BOOST"), (En, "GPU BOOST")],
            &[r#"reg add "HKLM\SYSTEM\CurrentControlSet\Control\GraphicsDrivers" /v HwSchMode /t REG_DWORD /d 2 /f"#],
        ),
        Operation::new(
            "mouse-fix",
            Category::Input,
            [(Tr, "MOUSE FIX"), (En, "MOUSE FIX")],
            &[r#"reg add "HKU\.DEFAULT\Control Panel\Mouse" /v MouseSpeed /t REG_SZ /d 0 /f"#],
        ),
        Operation::new(
            "disable-fso",
            Category::Graphics,
            [(Tr, "FSO KAPAT"), (En, "FSO DISABLE")],
            &[r#"reg add "HKCU\System\GameConfigStore" /v GameDVR_FSEBehavior /t REG_DWORD /d 2 /f"#],
        ),
        Operation::new(
            "optimize-ping",
            Category::Network,
            [(Tr, "PİNG OPT."), (En, "PING OPT.")],
            &[r#"reg add "HKLM\SOFTWARE\Microsoft\Windows NT\CurrentVersion\Multimedia\SystemProfile" /v NetworkThrottlingIndex /t REG_DWORD /d 0xffffffff /f"#],
        ),
        Operation::new(
            "clean-junk",
            Category::Cleanup,
            [(Tr, "GEREKSİZ SİL"), (En, "CLEAN JUNK")],
            &[
                r"del /q/f/s %TEMP%\*",
                r"del /q/f/s C:\Windows\Temp\*",
                "cleanmgr /sagerun:1",
            ],
        ),
        Operation::new(
            "cpu-priority",
            Category::System,
            [(Tr, "CPU ÖNCELİK"), (En, "CPU PRIORITY")],
            &[r#"reg add "HKLM\SOFTWARE\Microsoft\Windows NT\CurrentVersion\Image File Execution Options\csgo.exe\PerfOptions" /v CpuPriorityClass /t REG_DWORD /d 3 /f"#],
        ),
        Operation::new(
            "shader-flush",
            Category::Graphics,
            [(Tr, "SHADER SİL"), (En, "SHADER FLUSH")],
            &[
                r#"if exist "%LOCALAPPDATA%\NVIDIA\DXCache" del /f /s /q "%LOCALAPPDATA%\NVIDIA\DXCache\*.*""#,
                r#"if exist "%LOCALAPPDATA%\AMD\DxCache" del /f /s /q "%LOCALAPPDATA%\AMD\DxCache\*.*""#,
                r#"if exist "%LOCALAPPDATA%\Intel\ShaderCache" del /f /s /q "%LOCALAPPDATA%\Intel\ShaderCache\*.*""#,
            ],
        ),
        Operation::new(
            "fast-boot",
            Category::System,
            [(Tr, "HIZLI BOOT"), (En, "FAST BOOT")],
            &["bcdedit /set {current} bootux disabled"],
        ),
        Operation::new(
            "clean-logs",
            Category::Cleanup,
            [(Tr, "LOG TEMİZLE"), (En, "CLEAN LOGS")],
            &[
                "wevtutil cl System",
                "wevtutil cl Application",
                "wevtutil cl Security",
                "wevtutil cl Setup",
            ],
        ),
        Operation::new(
            "optimize-network",
            Category::Network,
            [(Tr, "AĞ OPT."), (En, "NETWORK OPT.")],
            &[
                "netsh int tcp set global autotuninglevel=normal",
                "netsh int tcp set global rss=enabled",
                "netsh winsock reset",
            ],
        ),
        Operation::new(
            "clean-registry",
            Category::Cleanup,
            [(Tr, "REGISTRY TEMİZ."), (En, "REGISTRY CLEAN")],
            &[r#"reg add "HKLM\SOFTWARE\Microsoft\Windows\CurrentVersion\Explorer\VolumeCaches\Old ChkDsk Files" /v StateFlags0001 /t REG_DWORD /d 2 /f"#],
        ),
        Operation::new(
            "power-plan",
            Category::Power,
            [(Tr, "GÜÇ PLANI"), (En, "POWER PLAN")],
            &["powercfg -setactive 8c5e7fda-e8bf-4a96-9a85-a6e23a8c635c"],
        ),
        Operation::new(
            "security-opt",
            Category::Security,
            [(Tr, "GÜVENLİK OPT."), (En, "SECURITY OPT.")],
            &[
                r#"reg add "HKLM\SYSTEM\CurrentControlSet\Control\Session Manager\Memory Management" /v FeatureSettingsOverride /t REG_DWORD /d 3 /f"#,
                r#"reg add "HKLM\SYSTEM\CurrentControlSet\Control\Session Manager\Memory Management" /v FeatureSettingsOverrideMask /t REG_DWORD /d 3 /f"#,
            ],
        ),
        Operation::new(
            "disk-defrag",
            Category::Storage,
            [(Tr, "DISK BİRLEŞTİR"), (En, "DISK DEFRAG")],
            &["defrag C: /O /U"],
        ),
        Operation::new(
            "optimize-services",
            Category::System,
            [(Tr, "SERVİS OPT."), (En, "SERVICE OPT.")],
            &[
                r#"sc config "SysMain" start= disabled"#,
                r#"sc stop "SysMain""#,
                r#"sc config "DiagTrack" start= disabled"#,
                r#"sc stop "DiagTrack""#,
            ],
        ),
        Operation::new(
            "optimize-startup",
            Category::System,
            [(Tr, "STARTUP OPT."), (En, "STARTUP OPT.")],
            &["taskmgr"],
        ),
        Operation::new(
            "visual-opt",
            Category::Visual,
            [(Tr, "GÖRSELLİK OPT."), (En, "VISUAL OPT.")],
            &[
                r#"reg add "HKCU\Control Panel\Desktop" /v DragFullWindows /t REG_SZ /d 0 /f"#,
                r#"reg add "HKCU\Control Panel\Desktop" /v MenuShowDelay /t REG_SZ /d 0 /f"#,
                r#"reg add "HKCU\Control Panel\Desktop\WindowMetrics" /v MinAnimate /t REG_SZ /d 0 /f"#,
            ],
        ),
    ]
}
